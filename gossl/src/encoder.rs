/// Converts `self` (of type `T`) into an `E`, the reverse of `Decoder`.
pub trait Encoder<T, E: EncodableTo<T>> {
    type Error;

    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker: `Self` can be encoded into a `T`.
pub trait EncodableTo<T> {}
