//! The two interleaved solution-element planes of the staggered scheme.

use std::fmt;

/// One of the two interleaved element planes.
///
/// The even plane holds solution elements centred on cell midpoints and is
/// where the initial condition lives. The odd plane is staggered by half a
/// cell. Every half-step moves the solution from one plane to the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Plane {
    /// `odd_plane = false`.
    #[default]
    Even,
    /// `odd_plane = true`.
    Odd,
}

impl Plane {
    /// Select a plane from the `odd_plane` flag.
    pub fn from_odd(odd_plane: bool) -> Self {
        if odd_plane {
            Self::Odd
        } else {
            Self::Even
        }
    }

    /// Whether this is the odd plane.
    pub fn is_odd(self) -> bool {
        self == Self::Odd
    }

    /// The other plane.
    pub fn flip(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }

    /// Storage slot (0 for even, 1 for odd).
    pub fn index(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Even => write!(f, "even"),
            Self::Odd => write!(f, "odd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_alternates() {
        assert_eq!(Plane::Even.flip(), Plane::Odd);
        assert_eq!(Plane::Odd.flip().flip(), Plane::Odd);
    }

    #[test]
    fn from_odd_flag() {
        assert_eq!(Plane::from_odd(false), Plane::Even);
        assert!(Plane::from_odd(true).is_odd());
        assert_eq!(Plane::Odd.index(), 1);
    }
}
