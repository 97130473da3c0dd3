use directions::Coordinate;

/// Which endpoint the next confirmed tap picks
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Selection {
    #[default]
    AwaitingStart,
    AwaitingEnd {
        origin: Coordinate,
    },
    Ready {
        origin: Coordinate,
        destination: Coordinate,
    },
}

impl Selection {
    /// Records a tap as the origin, then the destination. Once both are set, taps are ignored.
    /// True if the state changed.
    pub fn advance(&mut self, pt: Coordinate) -> bool {
        match *self {
            Selection::AwaitingStart => {
                *self = Selection::AwaitingEnd { origin: pt };
                true
            }
            Selection::AwaitingEnd { origin } => {
                *self = Selection::Ready {
                    origin,
                    destination: pt,
                };
                true
            }
            Selection::Ready { .. } => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Selection::AwaitingStart;
    }

    pub fn origin(&self) -> Option<Coordinate> {
        match *self {
            Selection::AwaitingStart => None,
            Selection::AwaitingEnd { origin } | Selection::Ready { origin, .. } => Some(origin),
        }
    }

    pub fn destination(&self) -> Option<Coordinate> {
        match *self {
            Selection::Ready { destination, .. } => Some(destination),
            _ => None,
        }
    }

    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        match *self {
            Selection::Ready {
                origin,
                destination,
            } => Some((origin, destination)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Selection::AwaitingStart => "awaiting-start",
            Selection::AwaitingEnd { .. } => "awaiting-end",
            Selection::Ready { .. } => "ready",
        }
    }
}
