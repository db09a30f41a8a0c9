/// Converts `self` (of type `T`) into a `D`.
///
/// Implementations live next to the target type; the marker bound keeps
/// unrelated conversions from type-checking.
pub trait Decoder<T, D: DecodableFrom<T>> {
    type Error;

    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker: `Self` can be decoded from a `T`.
pub trait DecodableFrom<T> {}
