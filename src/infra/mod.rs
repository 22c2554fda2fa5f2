pub mod azalea_session;
