pub mod directory;
pub mod error;
pub mod vcf;

pub use directory::{load_directory, parse_directory};
pub use error::{Result, SyncError};
pub use vcf::{load_vcf, parse_vcf, DeviceContact, ParsedVcf};
