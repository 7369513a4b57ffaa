/// Person identifiers arrive as path parameters and must be strictly positive.
pub type PersonId = i64;
