use std::sync::{mpsc, Arc};

use tracing::trace;

use super::{comm::Communicator, message::Message};
use crate::{Error, Partition, Result};

/// Represents a rank in relation to the other ranks of a run.
///
/// Every ordered pair of ranks has its own channel, so messages from one
/// source always arrive in the order they were sent and a fast rank's next
/// step can never be mistaken for a slow rank's current one.
pub struct Domain {
    rank: usize,
    senders: Vec<Option<mpsc::Sender<Message>>>, // indexed by destination
    receivers: Vec<Option<mpsc::Receiver<Message>>>, // indexed by source
}
impl Domain {
    /// Wire up `size` fully connected ranks
    pub fn connect(size: usize) -> Vec<Domain> {
        let mut domains: Vec<Domain> = (0..size)
            .map(|rank| Domain {
                rank,
                senders: (0..size).map(|_| None).collect(),
                receivers: (0..size).map(|_| None).collect(),
            })
            .collect();

        for source in 0..size {
            for dest in 0..size {
                if source == dest {
                    continue;
                }
                let (tx, rx) = mpsc::channel();
                domains[source].senders[dest] = Some(tx);
                domains[dest].receivers[source] = Some(rx);
            }
        }
        domains
    }

    fn send(&self, dest: usize, message: Message) -> Result<()> {
        let sender = self.senders[dest]
            .as_ref()
            .ok_or_else(|| Error::comm(format!("rank {} has no channel to itself", self.rank)))?;
        sender
            .send(message)
            .map_err(|_| Error::comm(format!("rank {} hung up on rank {}", dest, self.rank)))
    }

    fn receive(&self, source: usize) -> Result<Message> {
        let receiver = self.receivers[source]
            .as_ref()
            .ok_or_else(|| Error::comm(format!("rank {} has no channel to itself", self.rank)))?;
        receiver
            .recv()
            .map_err(|_| Error::comm(format!("rank {} hung up on rank {}", source, self.rank)))
    }

    fn send_to_others(&self, make: impl Fn() -> Message) -> Result<()> {
        for dest in (0..self.size()).filter(|&d| d != self.rank) {
            self.send(dest, make())?;
        }
        Ok(())
    }

    /// Send this rank's owned positions to every other rank, copied once
    fn publish(&self, local: &[[f64; 2]]) -> Result<()> {
        let shared: Arc<[[f64; 2]]> = Arc::from(local);
        self.send_to_others(|| Message::Slice(Arc::clone(&shared)))
    }

    fn unexpected(&self, source: usize, expected: &str, found: &Message) -> Error {
        Error::comm(format!(
            "rank {} expected {} from rank {}, received {}",
            self.rank,
            expected,
            source,
            found.kind()
        ))
    }
}

impl Communicator for Domain {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.senders.len()
    }

    fn broadcast_count(&self, count: usize) -> Result<usize> {
        if self.is_root() {
            self.send_to_others(|| Message::Count(count))?;
            return Ok(count);
        }
        match self.receive(0)? {
            Message::Count(n) => Ok(n),
            other => Err(self.unexpected(0, "count", &other)),
        }
    }

    fn broadcast_positions(&self, positions: &mut Vec<[f64; 2]>) -> Result<()> {
        if self.is_root() {
            return self.send_to_others(|| Message::Positions(positions.clone()));
        }
        match self.receive(0)? {
            Message::Positions(p) => {
                *positions = p;
                Ok(())
            }
            other => Err(self.unexpected(0, "positions", &other)),
        }
    }

    fn all_gather(
        &self,
        local: &[[f64; 2]],
        partition: &Partition,
        global: &mut [[f64; 2]],
    ) -> Result<()> {
        trace!(rank = self.rank, nlocal = local.len(), "all-gather");
        self.publish(local)?;
        global[partition.range(self.rank)].copy_from_slice(local);

        for source in (0..self.size()).filter(|&s| s != self.rank) {
            match self.receive(source)? {
                Message::Slice(slice) if slice.len() == partition.counts()[source] => {
                    global[partition.range(source)].copy_from_slice(&slice);
                }
                Message::Slice(slice) => {
                    return Err(Error::comm(format!(
                        "rank {} sent {} positions, expected {}",
                        source,
                        slice.len(),
                        partition.counts()[source]
                    )))
                }
                other => return Err(self.unexpected(source, "slice", &other)),
            }
        }
        Ok(())
    }

    fn all_reduce_sum(&self, value: f64) -> Result<f64> {
        self.send_to_others(|| Message::Scalar(value))?;
        // Summed in rank order so every rank gets the same bits
        let mut total = 0.0;
        for source in 0..self.size() {
            if source == self.rank {
                total += value;
                continue;
            }
            match self.receive(source)? {
                Message::Scalar(v) => total += v,
                other => return Err(self.unexpected(source, "scalar", &other)),
            }
        }
        Ok(total)
    }
}
