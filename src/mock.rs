//! Test doubles for the I2C bus and the indicator pin.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// One I2C transaction with all written bytes concatenated.
#[derive(Clone, Debug)]
pub struct Write {
    pub address: u8,
    pub bytes: Vec<u8>,
}

/// Bus that records every transaction and always acknowledges.
#[derive(Default)]
pub struct RecordingBus {
    pub writes: Vec<Write>,
}

impl RecordingBus {
    /// Payload of the last data transfer (without the control byte).
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.bytes.len() > 2 && w.bytes[0] == crate::ssd1306::CONTROL_DATA)
            .map(|w| &w.bytes[1..])
    }

    /// Number of data transfers seen.
    pub fn frame_count(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| w.bytes.first() == Some(&crate::ssd1306::CONTROL_DATA))
            .count()
    }
}

impl ErrorType for RecordingBus {
    type Error = Infallible;
}

impl I2c for RecordingBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bytes = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => bytes.extend_from_slice(data),
                Operation::Read(buf) => buf.fill(0),
            }
        }
        self.writes.push(Write { address, bytes });
        Ok(())
    }
}

/// Bus that acknowledges a fixed number of transactions, then NAKs.
pub struct FailingBus {
    remaining: usize,
    pub attempts: usize,
}

impl FailingBus {
    pub fn after(successes: usize) -> Self {
        Self {
            remaining: successes,
            attempts: 0,
        }
    }
}

impl ErrorType for FailingBus {
    type Error = ErrorKind;
}

impl I2c for FailingBus {
    async fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.attempts += 1;
        if self.remaining == 0 {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        self.remaining -= 1;
        Ok(())
    }
}

/// Recording bus that NAKs exactly one transaction, then acknowledges again.
pub struct FlakyBus {
    pub recorded: RecordingBus,
    fail_at: usize,
    pub attempts: usize,
}

impl FlakyBus {
    /// Fail the `index`-th transaction (0-based) and no other.
    pub fn failing_at(index: usize) -> Self {
        Self {
            recorded: RecordingBus::default(),
            fail_at: index,
            attempts: 0,
        }
    }
}

impl ErrorType for FlakyBus {
    type Error = ErrorKind;
}

impl I2c for FlakyBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if attempt == self.fail_at {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
        }
        let Ok(()) = self.recorded.transaction(address, operations).await;
        Ok(())
    }
}

/// Output pin remembering its level history.
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl MockPin {
    pub fn is_high(&self) -> Option<bool> { self.levels.last().copied() }
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}
