pub mod hours;
pub mod observation;
pub mod report;
pub mod settings;
pub mod timezone;

// Re-export commonly used types
pub use hours::{MenuHours, NewMenuHours};
pub use observation::{NewStoreStatus, StoreStatus};
pub use report::{Admission, ReportCache};
pub use settings::Setting;
pub use timezone::{NewStoreTimeZone, StoreTimeZone};
