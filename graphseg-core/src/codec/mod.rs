//! Binary persistence for [`Component`] values.
//!
//! Every component is written as a little-endian, length-prefixed record:
//!
//! ```text
//! u64        vertex count n
//! n x V      vertices, each through V's `Encode` impl
//! P          property, through P's `Encode` impl
//! ```
//!
//! Integers use their natural width (`usize` travels as `u64`), floats
//! travel as their IEEE-754 bit patterns. A run of components is prefixed by
//! a `u64` count, see [`write_components`] and [`read_components`].
//!
//! Any [`io::Write`] is a sink and any [`io::Read`] a source, so files and
//! in-memory buffers share one code path.

use std::io::{self, Read, Write};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{component::Component, error::define_error_codes};

/// Errors raised while decoding persisted components.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source ended in the middle of a record.
    #[error("input ended while reading {context}")]
    Truncated {
        /// The field being decoded when the input ran out.
        context: &'static str,
    },
    /// A persisted index does not fit the host `usize`.
    #[error("persisted index {value} does not fit in usize")]
    IndexOverflow {
        /// The value read from the source.
        value: u64,
    },
    /// The source held data after the last expected record.
    #[error("unexpected data after the last record")]
    TrailingBytes,
    /// The sink or source failed.
    #[error("i/o failure: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`CodecError`] variants.
    enum CodecErrorCode for CodecError {
        /// The source ended in the middle of a record.
        Truncated => Truncated { .. } => "CODEC_TRUNCATED",
        /// A persisted index does not fit the host `usize`.
        IndexOverflow => IndexOverflow { .. } => "CODEC_INDEX_OVERFLOW",
        /// The source held data after the last expected record.
        TrailingBytes => TrailingBytes => "CODEC_TRAILING_BYTES",
        /// The sink or source failed.
        Io => Io { .. } => "CODEC_IO",
    }
}

/// Values that can be written to a byte sink.
pub trait Encode {
    /// Writes `self` to `writer`.
    ///
    /// # Errors
    /// Returns the sink's I/O error.
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()>;
}

/// Values that can be read back from a byte source.
pub trait Decode: Sized {
    /// Reads one value from `reader`.
    ///
    /// # Errors
    /// Returns [`CodecError::Truncated`] when the source ends early and
    /// [`CodecError::Io`] for other source failures.
    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError>;
}

fn read_array<const N: usize, R: Read + ?Sized>(
    reader: &mut R,
    context: &'static str,
) -> Result<[u8; N], CodecError> {
    let mut buffer = [0_u8; N];
    reader.read_exact(&mut buffer).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            CodecError::Truncated { context }
        } else {
            CodecError::Io { source: err }
        }
    })?;
    Ok(buffer)
}

macro_rules! impl_le_codec {
    ($($ty:ty => $context:literal),+ $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
                    writer.write_all(&self.to_le_bytes())
                }
            }

            impl Decode for $ty {
                fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
                    read_array(reader, $context).map(<$ty>::from_le_bytes)
                }
            }
        )+
    };
}

impl_le_codec!(u32 => "u32", u64 => "u64", f32 => "f32", f64 => "f64");

impl Encode for usize {
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let wide = u64::try_from(*self)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "index exceeds u64"))?;
        wide.encode(writer)
    }
}

impl Decode for usize {
    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let value = u64::decode(reader)?;
        Self::try_from(value).map_err(|_| CodecError::IndexOverflow { value })
    }
}

fn encode_len<W: Write + ?Sized>(len: usize, writer: &mut W) -> io::Result<()> {
    len.encode(writer)
}

fn decode_len<R: Read + ?Sized>(reader: &mut R) -> Result<usize, CodecError> {
    usize::decode(reader).map_err(|err| match err {
        CodecError::Truncated { .. } => CodecError::Truncated { context: "length prefix" },
        other => other,
    })
}

impl<V: Encode, P: Encode> Encode for Component<V, P> {
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        encode_len(self.num_vertices(), writer)?;
        for vertex in self {
            vertex.encode(writer)?;
        }
        self.property().encode(writer)
    }
}

impl<V: Decode, P: Decode> Decode for Component<V, P> {
    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let count = decode_len(reader)?;
        // The prefix is untrusted, so grow as vertices arrive.
        let mut members = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            members.push(V::decode(reader)?);
        }
        let property = P::decode(reader)?;
        Ok(Self::from_parts(members, property))
    }
}

impl<V: Encode, P: Encode> Component<V, P> {
    /// Writes the component in the persisted binary format.
    ///
    /// # Errors
    /// Returns the sink's I/O error.
    ///
    /// # Examples
    /// ```
    /// use graphseg_core::Component;
    ///
    /// let mut component = Component::<u32, f64>::singleton(3);
    /// component.set_property(0.5);
    /// let mut bytes = Vec::new();
    /// component.write_to(&mut bytes)?;
    /// assert_eq!(bytes.len(), 8 + 4 + 8);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        self.encode(writer)
    }
}

impl<V: Decode, P: Decode> Component<V, P> {
    /// Reads a component written by [`Component::write_to`].
    ///
    /// # Errors
    /// Returns [`CodecError`] when the source is truncated, holds an index
    /// that does not fit the host, or fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use graphseg_core::Component;
    ///
    /// let mut component = Component::<u32, f64>::singleton(3);
    /// component.insert_vertex(4);
    /// let mut bytes = Vec::new();
    /// component.write_to(&mut bytes)?;
    ///
    /// let restored = Component::<u32, f64>::read_from(&mut Cursor::new(bytes))?;
    /// assert_eq!(restored, component);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        Self::decode(reader)
    }
}

/// Writes a count-prefixed run of components.
///
/// # Errors
/// Returns the sink's I/O error.
#[instrument(name = "core.write_components", err, skip(components, writer), fields(count = components.len()))]
pub fn write_components<V, P, W>(components: &[Component<V, P>], writer: &mut W) -> io::Result<()>
where
    V: Encode,
    P: Encode,
    W: Write + ?Sized,
{
    encode_len(components.len(), writer)?;
    for component in components {
        component.encode(writer)?;
    }
    Ok(())
}

/// Reads a run of components written by [`write_components`].
///
/// Reading stops after the last counted record; anything that follows is
/// left in `reader`. Call [`ensure_exhausted`] when the run must be the whole
/// source.
///
/// # Errors
/// Returns [`CodecError`] when any record fails to decode.
#[instrument(name = "core.read_components", err, skip(reader))]
pub fn read_components<V, P, R>(reader: &mut R) -> Result<Vec<Component<V, P>>, CodecError>
where
    V: Decode,
    P: Decode,
    R: Read + ?Sized,
{
    let count = decode_len(reader)?;
    let mut components = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        components.push(Component::decode(reader)?);
    }
    debug!(count, "decoded components");
    Ok(components)
}

/// Checks that `reader` has no data left.
///
/// # Errors
/// Returns [`CodecError::TrailingBytes`] when at least one more byte can be
/// read and [`CodecError::Io`] when the source fails.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphseg_core::{CodecError, codec::ensure_exhausted};
///
/// let mut source = Cursor::new(vec![0_u8]);
/// assert!(matches!(ensure_exhausted(&mut source), Err(CodecError::TrailingBytes)));
/// assert!(ensure_exhausted(&mut Cursor::new(Vec::new())).is_ok());
/// ```
pub fn ensure_exhausted<R: Read + ?Sized>(reader: &mut R) -> Result<(), CodecError> {
    let mut next = [0_u8; 1];
    loop {
        match reader.read(&mut next) {
            Ok(0) => return Ok(()),
            Ok(_) => return Err(CodecError::TrailingBytes),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(CodecError::Io { source: err }),
        }
    }
}
