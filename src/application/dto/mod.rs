/// Data Transfer Objects for the application layer
mod outcome;
mod raw_event;

pub use outcome::{AlertOutcome, InvocationContext};
pub use raw_event::{
    FindingDetail, PackageVulnerabilityDetails, RawEvent, ResourceRef, VulnerablePackage,
};
