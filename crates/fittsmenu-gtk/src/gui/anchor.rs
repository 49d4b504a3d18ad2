use fittsmenu::Point;

/// Where the next popup will be centred.
///
/// A hidden overlay usually cannot report the pointer, so a show request
/// without a known position maps the overlay and waits for the first pointer
/// coordinates it receives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PopupAnchor {
    #[default]
    Idle,
    AwaitingPointer,
}

impl PopupAnchor {
    /// A popup was requested. Returns the centre to open at right away, if any.
    pub fn request(&mut self, known: Option<Point>) -> Option<Point> {
        *self = match known {
            Some(_) => PopupAnchor::Idle,
            None => PopupAnchor::AwaitingPointer,
        };
        known
    }

    /// Pointer coordinates arrived on the overlay. Returns the centre to open
    /// at when a popup is waiting for one.
    pub fn observe(&mut self, pointer: Point) -> Option<Point> {
        match std::mem::take(self) {
            PopupAnchor::AwaitingPointer => Some(pointer),
            PopupAnchor::Idle => None,
        }
    }

    /// Drops a waiting request. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(self) == PopupAnchor::AwaitingPointer
    }

    pub fn is_waiting(&self) -> bool {
        *self == PopupAnchor::AwaitingPointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pointer_opens_immediately() {
        let mut anchor = PopupAnchor::default();
        let p = Point::new(640.0, 360.0);

        assert_eq!(anchor.request(Some(p)), Some(p));
        assert!(!anchor.is_waiting());
        assert_eq!(anchor.observe(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_unknown_pointer_waits_for_first_coordinates() {
        let mut anchor = PopupAnchor::default();

        assert_eq!(anchor.request(None), None);
        assert!(anchor.is_waiting());

        let first = Point::new(812.0, 433.0);
        assert_eq!(anchor.observe(first), Some(first));
        assert_eq!(anchor.observe(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_cancel_drops_waiting_request() {
        let mut anchor = PopupAnchor::default();
        anchor.request(None);

        assert!(anchor.cancel());
        assert!(!anchor.cancel());
        assert_eq!(anchor.observe(Point::new(5.0, 5.0)), None);
    }
}
