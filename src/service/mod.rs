pub mod bot_session;
pub mod command_dispatcher;
pub mod landing_resolver;
pub mod lifecycle;
pub mod scheduler;
pub mod status_report;
pub mod teleport_assist;
