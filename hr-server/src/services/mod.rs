//! Services - logic that spans several repositories or leaves the request
//!
//! - [`mailer`] - SMTP transport behind the `Mailer` trait
//! - [`notification`] - email templates and delivery
//! - [`outbox`] - background delivery of queued email
//! - [`onboarding`] - bulk tenant setup
//! - [`timesheet`] - weekly summary and approval grouping
//! - [`seed`] - bootstrap super admin

pub mod mailer;
pub mod notification;
pub mod onboarding;
pub mod outbox;
pub mod seed;
pub mod timesheet;

pub use mailer::{EmailMessage, MailError, Mailer, RecordingMailer, SmtpMailer};
pub use notification::NotificationService;
pub use onboarding::OnboardingService;
pub use outbox::{OutboxWorker, drain_once};
