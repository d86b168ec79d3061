pub mod auth;
pub mod feedback;
pub mod link;
pub mod notification;
pub mod stats;
pub mod user;

pub use auth::{Credentials, RegisterRequest, Session, SessionResponse, TokenResponse, UpdateProfileRequest};
pub use feedback::FeedbackRequest;
pub use link::{CursoProfessor, ProfessorDisciplina};
pub use notification::{Notificacao, NotificacoesResponse, NotificationStatus};
pub use stats::Stats;
pub use user::{Role, User};

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
