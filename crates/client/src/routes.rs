/// Navigation targets of the front-end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Shipments,
    ShipmentDetail(i64),
}

impl Route {
    /// Parses a navigation path. The empty path redirects to the list.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["shipments"] => Some(Self::Shipments),
            ["shipments", id] => id.parse().ok().map(Self::ShipmentDetail),
            _ => None,
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Shipments => "/shipments".to_string(),
            Self::ShipmentDetail(id) => format!("/shipments/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_redirects_to_list() {
        assert_eq!(Route::parse(""), Some(Route::Shipments));
        assert_eq!(Route::parse("/"), Some(Route::Shipments));
        assert_eq!(Route::parse("/shipments"), Some(Route::Shipments));
    }

    #[test]
    fn detail_route_carries_id() {
        assert_eq!(Route::parse("/shipments/42"), Some(Route::ShipmentDetail(42)));
        assert_eq!(Route::ShipmentDetail(42).path(), "/shipments/42");
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(Route::parse("/shipments/abc"), None);
        assert_eq!(Route::parse("/calculations"), None);
        assert_eq!(Route::parse("/shipments/1/extra"), None);
    }
}
