use crate::routes::{
    auth::models::*, auth::*, events::models::*, events::*, health::*,
    invitations::models::*, invitations::*,
};
use crate::utils::auth::{models::User, Authenticated};
use crate::utils::events::models::Event;
use crate::utils::invitations::models::{
    Invitation, InvitationDetails, InvitationReply, InvitationStatus,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
info(title = "Rsvp", description = "Events and invitations", ),
paths(
health,
ping,
post_register_user,
post_login_user,
get_profile,
post_logout_user,
create_event,
get_events,
get_my_events,
get_event,
update_event,
delete_event,
get_event_invitations,
create_invitation,
get_received_invitations,
get_sent_invitations,
get_invitation,
get_invitation_details,
respond_invitation,
cancel_invitation,
),
components(schemas(
User,
Authenticated,
LoginCredentials,
RegisterCredentials,
Event,
CreateEvent,
UpdateEvent,
Invitation,
InvitationStatus,
InvitationReply,
InvitationDetails,
CreateInvitation,
RespondInvitation,
)),
tags((name = "health"),(name = "auth"),(name = "events"),(name = "invitations"))
)]
pub struct ApiDoc;
