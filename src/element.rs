//! Symbol alphabet for DNS trace sequences
//!
//! A trace is reduced to a stream of [`SequenceElement`]s: quantized message
//! sizes and quantized timing gaps. Quantization is pure and stable, so two
//! independently built sequences remain comparable.

use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug};
use std::time::Duration;
use thiserror::Error;

/// Largest representable size bucket (padded response size / block size)
pub const MAX_SIZE_BUCKET: u8 = 15;

/// Largest representable gap bucket (log2 of elapsed base units)
pub const MAX_GAP_BUCKET: u8 = 15;

/// Number of distinct cost-table indices: epsilon + sizes 1..=15 + gaps 0..=15
pub const ALPHABET_LEN: usize = 1 + MAX_SIZE_BUCKET as usize + MAX_GAP_BUCKET as usize + 1;

/// Cost-table index reserved for "no symbol" (insertion/deletion column)
pub(crate) const EPSILON_INDEX: usize = 0;

/// Base unit for gap quantization (time between two consecutive responses)
pub const BASE_GAP: Duration = Duration::from_micros(1000);

/// Padding block size for client queries
const QUERY_BLOCK: u32 = 128;

/// Padding block size for resolver responses
const RESPONSE_BLOCK: u32 = 468;

/// Errors for symbol construction from raw observations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketError {
    #[error("size bucket {bucket} out of range (valid: 1..={max})")]
    SizeBucketOutOfRange { bucket: u32, max: u8 },

    #[error("gap bucket {bucket} out of range (valid: 0..={max})")]
    GapBucketOutOfRange { bucket: u32, max: u8 },
}

/// Direction of a DNS message, selects the padding block size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Query,
    Response,
}

/// One quantized trace event
///
/// `Size(n)` is the padded message size in blocks, `Gap(g)` the log2-compressed
/// number of base units elapsed since the previous message. A `Size(0)` never
/// occurs in a well-formed sequence; `Gap(0)` marks a sub-threshold gap kept
/// only for message counting.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SequenceElement {
    Size(u8),
    Gap(u8),
}

impl SequenceElement {
    /// Quantize a raw message size into a `Size` bucket
    ///
    /// Sizes are padded to the next full block (128 bytes for queries, 468
    /// bytes for responses) and expressed as a block count. Zero-byte
    /// messages and sizes beyond the table bounds are rejected.
    pub fn from_message_size(bytes: u32, direction: Direction) -> Result<Self, BucketError> {
        let block = match direction {
            Direction::Query => QUERY_BLOCK,
            Direction::Response => RESPONSE_BLOCK,
        };
        let bucket = block_padding(bytes, block) / block;
        if bucket == 0 || bucket > u32::from(MAX_SIZE_BUCKET) {
            return Err(BucketError::SizeBucketOutOfRange {
                bucket,
                max: MAX_SIZE_BUCKET,
            });
        }
        Ok(SequenceElement::Size(bucket as u8))
    }

    /// Quantize the time between two consecutive messages into a `Gap` bucket
    ///
    /// The gap is measured in elapsed [`BASE_GAP`] units and log2-compressed.
    /// Gaps of at most one base unit, or whose logarithm rounds to zero,
    /// produce no symbol. Buckets are clamped to [`MAX_GAP_BUCKET`] (a 32 s
    /// pause already saturates the scale).
    pub fn from_gap(gap: Duration) -> Option<Self> {
        if gap <= BASE_GAP {
            return None;
        }
        // ceil(gap / base) - 1, matching a repeated-subtraction count
        let units = gap.as_nanos().div_ceil(BASE_GAP.as_nanos()) - 1;
        let bucket = (units as f64).log2() as u8;
        if bucket == 0 {
            None
        } else {
            Some(SequenceElement::Gap(bucket.min(MAX_GAP_BUCKET)))
        }
    }

    /// Dense cost-table index of this symbol
    ///
    /// Index 0 is reserved for "no symbol"; sizes occupy 1..=15, gaps the
    /// rest. Out-of-range buckets saturate so a lookup can never leave the
    /// table; [`crate::cost::CostTable`] validates buckets at construction.
    pub(crate) fn index(self) -> usize {
        match self {
            SequenceElement::Size(s) => s.min(MAX_SIZE_BUCKET) as usize,
            SequenceElement::Gap(g) => {
                1 + MAX_SIZE_BUCKET as usize + g.min(MAX_GAP_BUCKET) as usize
            }
        }
    }

    /// Inverse of [`SequenceElement::index`], `None` for the epsilon index
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        match index {
            EPSILON_INDEX => None,
            i if i <= MAX_SIZE_BUCKET as usize => Some(SequenceElement::Size(i as u8)),
            i if i < ALPHABET_LEN => {
                Some(SequenceElement::Gap((i - 1 - MAX_SIZE_BUCKET as usize) as u8))
            }
            _ => None,
        }
    }

    /// `true` for `Size(_)` symbols
    pub fn is_size(self) -> bool {
        matches!(self, SequenceElement::Size(_))
    }
}

fn block_padding(size: u32, block_size: u32) -> u32 {
    if size % block_size == 0 {
        size
    } else {
        size / block_size * block_size + block_size
    }
}

impl Debug for SequenceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l, v) = match self {
            SequenceElement::Size(v) => ("S", *v),
            SequenceElement::Gap(v) => ("G", *v),
        };
        write!(f, "{}{:>2}", l, v)
    }
}

impl Serialize for SequenceElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let res = match self {
            SequenceElement::Gap(g) => format!("G{:0>2}", g),
            SequenceElement::Size(s) => format!("S{:0>2}", s),
        };
        serializer.serialize_str(&res)
    }
}

impl<'de> Deserialize<'de> for SequenceElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Helper;
        use serde::de::Error;

        impl Visitor<'_> for Helper {
            type Value = SequenceElement;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "string in format `S00` or `G00`")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                let bytes = value.as_bytes();
                if bytes.len() < 2 || !matches!(bytes[0], b'G' | b'S') {
                    return Err(Error::custom(format!(
                        "the string must start with `G` or `S` followed by digits, got `{value}`"
                    )));
                }
                // the first byte is ASCII, so index 1 is a char boundary
                let digits = &value[1..];
                let bucket = digits.parse::<u8>().map_err(|_| {
                    Error::custom(format!("the string must end in digits, got `{digits:?}`"))
                })?;
                match bytes[0] {
                    b'G' if bucket <= MAX_GAP_BUCKET => Ok(SequenceElement::Gap(bucket)),
                    b'S' if (1..=MAX_SIZE_BUCKET).contains(&bucket) => {
                        Ok(SequenceElement::Size(bucket))
                    }
                    _ => Err(Error::custom(format!(
                        "bucket {bucket} out of range in `{value}`"
                    ))),
                }
            }
        }

        deserializer.deserialize_str(Helper)
    }
}
