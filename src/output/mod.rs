//! Trajectory output.
//!
//! The binary layout written by [`TrajectoryWriter`]:
//! - 8 bytes ASCII magic `NBView00`
//! - particle count as `u32`, little endian
//! - scale as `f32`, little endian (always 1.0)
//! - per frame, `2 n` little-endian `f32` values `x0 y0 x1 y1 ...`

use std::io::{self, Read, Write};

use crate::{Error, Result};

pub const MAGIC: &[u8; 8] = b"NBView00";

/// Sink for the frames of a run
pub trait FrameWriter {
    fn write_header(&mut self, num_particles: usize) -> Result<()>;
    /// Every particle's position, in index order
    fn write_frame(&mut self, positions: &[[f64; 2]]) -> Result<()>;
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: FrameWriter + ?Sized> FrameWriter for &mut T {
    fn write_header(&mut self, num_particles: usize) -> Result<()> {
        (**self).write_header(num_particles)
    }
    fn write_frame(&mut self, positions: &[[f64; 2]]) -> Result<()> {
        (**self).write_frame(positions)
    }
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Binary trajectory in the `NBView00` layout
pub struct TrajectoryWriter<W: Write> {
    inner: W,
    num_particles: Option<usize>,
    buffer: Vec<u8>,
}
impl<W: Write> TrajectoryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            num_particles: None,
            buffer: Vec::new(),
        }
    }
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> FrameWriter for TrajectoryWriter<W> {
    fn write_header(&mut self, num_particles: usize) -> Result<()> {
        let n = u32::try_from(num_particles).map_err(|_| {
            Error::config(format!("{} particles do not fit the header", num_particles))
        })?;
        self.inner.write_all(MAGIC)?;
        self.inner.write_all(&n.to_le_bytes())?;
        self.inner.write_all(&1.0f32.to_le_bytes())?;
        self.num_particles = Some(num_particles);
        Ok(())
    }

    fn write_frame(&mut self, positions: &[[f64; 2]]) -> Result<()> {
        match self.num_particles {
            Some(n) if n == positions.len() => {}
            Some(n) => {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("frame has {} particles, header says {}", positions.len(), n),
                )))
            }
            None => {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "frame written before header",
                )))
            }
        }
        self.buffer.clear();
        for p in positions {
            self.buffer.extend_from_slice(&(p[0] as f32).to_le_bytes());
            self.buffer.extend_from_slice(&(p[1] as f32).to_le_bytes());
        }
        self.inner.write_all(&self.buffer)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Drops every frame, for units that do not write
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl FrameWriter for Discard {
    fn write_header(&mut self, _num_particles: usize) -> Result<()> {
        Ok(())
    }
    fn write_frame(&mut self, _positions: &[[f64; 2]]) -> Result<()> {
        Ok(())
    }
}

/// Frames kept in memory
#[derive(Clone, Debug, Default)]
pub struct MemoryTrajectory {
    pub num_particles: Option<usize>,
    pub frames: Vec<Vec<[f64; 2]>>,
}
impl MemoryTrajectory {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn last_frame(&self) -> Option<&[[f64; 2]]> {
        self.frames.last().map(|f| f.as_slice())
    }
}

impl FrameWriter for MemoryTrajectory {
    fn write_header(&mut self, num_particles: usize) -> Result<()> {
        self.num_particles = Some(num_particles);
        Ok(())
    }
    fn write_frame(&mut self, positions: &[[f64; 2]]) -> Result<()> {
        self.frames.push(positions.to_vec());
        Ok(())
    }
}

/// Read back a whole `NBView00` trajectory, frames in single precision
pub fn read_trajectory<R: Read>(mut reader: R) -> Result<(usize, Vec<Vec<[f32; 2]>>)> {
    let invalid =
        |msg: &str| Error::Io(io::Error::new(io::ErrorKind::InvalidData, msg.to_owned()));

    let mut header = [0u8; 16];
    reader.read_exact(&mut header)?;
    if &header[..8] != MAGIC {
        return Err(invalid("missing NBView00 magic"));
    }
    let n = u32::from_le_bytes([header[8], header[9], header[10], header[11]]) as usize;

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    let frame_bytes = n * 2 * 4;
    if frame_bytes == 0 {
        return Ok((n, Vec::new()));
    }
    if body.len() % frame_bytes != 0 {
        return Err(invalid("trailing partial frame"));
    }

    let frames = body
        .chunks_exact(frame_bytes)
        .map(|frame| {
            frame
                .chunks_exact(8)
                .map(|b| {
                    [
                        f32::from_le_bytes([b[0], b[1], b[2], b[3]]),
                        f32::from_le_bytes([b[4], b[5], b[6], b[7]]),
                    ]
                })
                .collect()
        })
        .collect();
    Ok((n, frames))
}
