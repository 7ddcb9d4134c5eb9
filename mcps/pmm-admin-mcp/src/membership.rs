//! Is the desired state already satisfied by a listing?
//!
//! The two states look at different fields: `present` searches for the
//! hostname, `absent` for the service name. Satisfied for `absent` means
//! the name is already gone.

use crate::pmm::error::{PmmError, PmmResult};
use crate::types::{DesiredState, RegistrationListing};

pub fn is_satisfied(
    desired_state: DesiredState,
    hostname: Option<&str>,
    service_name: &str,
    listing: &RegistrationListing,
) -> PmmResult<bool> {
    match desired_state {
        DesiredState::Present => {
            let hostname = hostname.filter(|h| !h.is_empty()).ok_or_else(|| {
                PmmError::validation("hostname is required when state is present")
            })?;
            Ok(listing.contains(hostname))
        }
        DesiredState::Absent => {
            if service_name.is_empty() {
                return Err(PmmError::validation("service_name is required"));
            }
            Ok(!listing.contains(service_name))
        }
    }
}
