//! Embedded vs standalone detection.
//!
//! The marker lists are exact literals; changing them changes which installs
//! talk to the custom component API.

use super::environment::{HostEnvironment, PageLocation};

/// Hostnames Home Assistant serves its own UI from.
pub const EMBEDDED_HOSTNAMES: [&str; 2] = ["homeassistant", "hassio"];

/// Path fragments that only occur when served through Home Assistant.
pub const EMBEDDED_PATH_MARKERS: [&str; 4] =
    ["/api/", "/local/", "/hacsfiles/", "/reterminal-dashboard"];

const FILE_PROTOCOL: &str = "file:";

/// Whether a page at `location` is running inside Home Assistant.
pub fn is_embedded(location: &PageLocation) -> bool {
    if location.protocol == FILE_PROTOCOL {
        return false;
    }

    EMBEDDED_HOSTNAMES.contains(&location.hostname.as_str())
        || EMBEDDED_PATH_MARKERS
            .iter()
            .any(|marker| location.pathname.contains(marker))
}

/// Inspect the host page; an unreadable location counts as standalone.
pub fn is_embedded_in_ha<E: HostEnvironment + ?Sized>(env: &E) -> bool {
    match env.location() {
        Ok(location) => is_embedded(&location),
        Err(e) => {
            log::debug!("Location unavailable, assuming standalone: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::connection::environment::StaticEnvironment;

    fn page(origin: &str, path: &str) -> PageLocation {
        PageLocation::from_origin(origin, path)
    }

    #[test]
    fn test_known_hostnames_are_embedded() {
        assert!(is_embedded(&page("http://homeassistant:8123", "/")));
        assert!(is_embedded(&page("http://hassio", "/")));
        assert!(!is_embedded(&page("http://homeassistant.local:8123", "/")));
    }

    #[test]
    fn test_path_markers_are_embedded() {
        assert!(is_embedded(&page("https://ha.example.com", "/api/hassio_ingress/x")));
        assert!(is_embedded(&page("https://ha.example.com", "/local/dash/index.html")));
        assert!(is_embedded(&page("https://ha.example.com", "/hacsfiles/dash/")));
        assert!(is_embedded(&page("https://ha.example.com", "/reterminal-dashboard")));
        assert!(!is_embedded(&page("http://localhost:8080", "/")));
        assert!(!is_embedded(&page("http://localhost:8080", "/api")));
    }

    #[test]
    fn test_file_protocol_is_never_embedded() {
        let mut loc = page("file://", "/local/reterminal-dashboard/index.html");
        loc.hostname = "homeassistant".to_string();
        assert!(!is_embedded(&loc));
    }

    #[test]
    fn test_missing_location_is_standalone() {
        assert!(!is_embedded_in_ha(&StaticEnvironment::default()));
        assert!(is_embedded_in_ha(&StaticEnvironment::new(page(
            "http://hassio:8123",
            "/"
        ))));
    }
}
