pub mod gems;
pub mod settings;

pub use gems::GemsPage;
pub use settings::SettingsPage;
