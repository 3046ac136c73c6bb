pub mod auth;

pub mod users;

pub mod courses;

pub mod modules;

pub mod lessons;

pub mod quizzes;

pub mod assignments;

pub mod submissions;

pub mod enrollments;

pub mod forums;

pub mod mentorship;

pub mod billing;

pub mod certificates;

pub mod notifications;

pub mod system;

pub use auth::configure_auth_routes;
pub use billing::configure_billing_routes;
pub use certificates::configure_certificate_routes;
pub use courses::configure_course_routes;
pub use enrollments::configure_enrollment_routes;
pub use mentorship::configure_mentorship_routes;
pub use notifications::configure_notification_routes;
pub use submissions::configure_submission_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

#[cfg(test)]
mod tests;
