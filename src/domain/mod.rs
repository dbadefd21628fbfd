pub mod audio;
pub mod campaign;
pub mod dispatch;
pub mod language;
pub mod recipients;
