pub const OPAQUE_HEADER_LEN: usize = 12;

pub const SEQUENCE_RANGE: std::ops::Range<usize> = 0..4;
pub const SECONDS_RANGE: std::ops::Range<usize> = 4..8;
pub const NANOS_RANGE: std::ops::Range<usize> = 8..12;

// Both variants agree from offset 12 onward.
pub const FRAME_ID_LEN_RANGE: std::ops::Range<usize> = 12..16;
pub const FRAME_ID_OFFSET: usize = 16;

pub const COUNT_SIZE: usize = 4;
pub const POINT_SIZE: usize = 24;

pub const MIN_LEN: usize = FRAME_ID_OFFSET + COUNT_SIZE;
