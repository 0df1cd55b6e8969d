//! Recognition of degenerate resolution shapes
//!
//! A handful of capture shapes carry no fingerprinting signal (single
//! response, plain www-redirect, unreachable name server). They are tagged
//! with a stable reason code which evaluation attaches to undetermined or
//! misclassified results.

use crate::element::SequenceElement;
use crate::sequence::Sequence;

/// Reason codes for sequences matching a well-known resolution shape
pub mod common_patterns {
    pub const R001: &str = "R001 Single Domain. A + DNSKEY";
    pub const R002: &str = "R002 Single Domain with www redirect. A + DNSKEY + A (for www)";
    pub const R003: &str = "R003 Two domains for website. (A + DNSKEY) * 2";
    pub const R004_SIZE1: &str = "R004 Single packet of size 1.";
    pub const R004_SIZE2: &str = "R004 Single packet of size 2.";
    pub const R004_SIZE3: &str = "R004 Single packet of size 3.";
    pub const R004_SIZE4: &str = "R004 Single packet of size 4.";
    pub const R004_SIZE5: &str = "R004 Single packet of size 5.";
    pub const R004_SIZE6: &str = "R004 Single packet of size 6.";
    pub const R004_UNKNOWN: &str = "R004 A single packet of unknown size.";
    pub const R005: &str = "R005 Two domains for website second is CNAME.";
    pub const R006: &str = "R006 www redirect + Akamai";
    pub const R006_3RD_LVL_DOM: &str = "R006 www redirect + Akamai on 3rd-LVL domain without DNSSEC";
    pub const R007: &str = "R007 Unreachable Name Server";
}

impl Sequence {
    /// Match this sequence against the known degenerate resolution shapes
    ///
    /// Returns the reason code if the size pattern (gaps ignored) is one of
    /// the common shapes, otherwise `None`. Empty sequences match nothing.
    pub fn common_pattern(&self) -> Option<&'static str> {
        use common_patterns::*;
        use SequenceElement::Size;

        let packets: Vec<_> = self
            .as_elements()
            .iter()
            .filter(|elem| elem.is_size())
            .cloned()
            .collect();

        match &*packets {
            [] => None,
            [Size(n)] => Some(match n {
                1 => R004_SIZE1,
                2 => R004_SIZE2,
                3 => R004_SIZE3,
                4 => R004_SIZE4,
                5 => R004_SIZE5,
                6 => R004_SIZE6,
                _ => R004_UNKNOWN,
            }),
            [Size(1), Size(2)] => Some(R001),
            [Size(1), Size(2), Size(1)] => Some(R002),
            [Size(1), Size(2), Size(1), Size(2)] => Some(R003),
            [Size(1), Size(2), Size(1), Size(1), Size(2), Size(2)] => Some(R005),
            [Size(1), Size(2), Size(1), Size(1), Size(1), Size(2), Size(2)] => Some(R006),
            [Size(1), Size(1), Size(1), Size(1), Size(2), Size(2)] => Some(R006_3RD_LVL_DOM),
            _ => {
                if self.is_unreachable_name_server() {
                    Some(R007)
                } else {
                    None
                }
            }
        }
    }

    /// Unreachable name servers retry with many Size(1) requests separated by
    /// gaps: `S G S G ... S`, never a larger response
    fn is_unreachable_name_server(&self) -> bool {
        use SequenceElement::{Gap, Size};

        let mut iter = self.as_elements().iter().fuse();
        loop {
            match (iter.next(), iter.next()) {
                // end of the sequence, pattern held throughout
                (Some(Size(1)), None) => return true,
                // the expected retry step
                (Some(Size(1)), Some(Gap(_))) => {}
                // anything else breaks the pattern, including ending on a gap
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::common_patterns::*;
    use crate::element::SequenceElement::{Gap, Size};
    use crate::sequence::Sequence;

    fn seq(elements: Vec<crate::element::SequenceElement>) -> Sequence {
        Sequence::new(elements, String::new())
    }

    #[test]
    fn test_pattern_r001() {
        assert_eq!(seq(vec![Size(1), Size(2)]).common_pattern(), Some(R001));
        assert_eq!(
            seq(vec![Size(1), Gap(3), Size(2)]).common_pattern(),
            Some(R001)
        );
        assert_eq!(
            seq(vec![Gap(9), Size(1), Gap(5), Size(2), Gap(12)]).common_pattern(),
            Some(R001)
        );
    }

    #[test]
    fn test_pattern_r002() {
        assert_eq!(
            seq(vec![Size(1), Size(2), Size(1)]).common_pattern(),
            Some(R002)
        );
        assert_eq!(
            seq(vec![Size(1), Gap(5), Size(2), Gap(10), Size(1)]).common_pattern(),
            Some(R002)
        );
        assert_ne!(
            seq(vec![Size(1), Size(1), Size(1)]).common_pattern(),
            Some(R002)
        );
        assert_ne!(
            seq(vec![Size(2), Size(1), Size(1)]).common_pattern(),
            Some(R002)
        );
    }

    #[test]
    fn test_pattern_r004() {
        assert_eq!(seq(vec![Size(1)]).common_pattern(), Some(R004_SIZE1));
        assert_eq!(seq(vec![Size(6)]).common_pattern(), Some(R004_SIZE6));
        assert_eq!(seq(vec![Size(9)]).common_pattern(), Some(R004_UNKNOWN));
    }

    #[test]
    fn test_pattern_r007() {
        assert_eq!(
            seq(vec![Size(1), Gap(3), Size(1)]).common_pattern(),
            Some(R007)
        );
        assert_eq!(
            seq(vec![Size(1), Gap(3), Size(1), Gap(3), Size(1), Gap(3), Size(1)]).common_pattern(),
            Some(R007)
        );
        // a larger response anywhere disproves the pattern
        assert_ne!(
            seq(vec![Size(1), Gap(3), Size(2), Gap(3), Size(1)]).common_pattern(),
            Some(R007)
        );
        // may not end on a gap
        assert_ne!(
            seq(vec![Size(1), Gap(3), Size(1), Gap(3)]).common_pattern(),
            Some(R007)
        );
    }

    #[test]
    fn test_no_pattern() {
        assert_eq!(seq(vec![]).common_pattern(), None);
        assert_eq!(
            seq(vec![Size(2), Size(3), Size(2), Size(4)]).common_pattern(),
            None
        );
    }
}
