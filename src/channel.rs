use crate::error::ChannelError;
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::{fmt, io::Write, time::Duration};

pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// An open, byte-oriented stream to the external device. The trigger
/// dispatcher only ever writes to it; opening and closing are the caller's job.
pub trait OutputChannel {
    fn name(&self) -> &str;

    /// Writes all of `bytes` to the channel, or fails without retrying.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel has been closed or if the underlying
    /// device rejects the write.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError>;
}

pub struct SerialChannel {
    name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialChannel")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}

impl SerialChannel {
    /// # Errors
    ///
    /// Returns an error if the port does not exist, is busy, or rejects the
    /// requested baud rate.
    pub fn open(name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, ChannelError> {
        let port = serialport::new(name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|source| ChannelError::Open {
                port: name.to_string(),
                source,
            })?;

        tracing::info!(port = name, baud_rate, "Opened serial port");

        Ok(Self {
            name: name.to_string(),
            port: Some(port),
        })
    }

    pub fn close(&mut self) {
        if self.port.take().is_some() {
            tracing::info!(port = %self.name, "Closed serial port");
        }
    }

    pub const fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl OutputChannel for SerialChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| ChannelError::Closed(self.name.clone()))?;

        port.write_all(bytes)
            .and_then(|()| port.flush())
            .map_err(|source| ChannelError::Io {
                port: self.name.clone(),
                source,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortListing {
    pub name: String,
    pub description: String,
}

impl fmt::Display for PortListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

impl From<SerialPortInfo> for PortListing {
    fn from(info: SerialPortInfo) -> Self {
        let description = match info.port_type {
            SerialPortType::UsbPort(usb) => usb.product.unwrap_or_else(|| {
                format!("USB VID:PID={:04X}:{:04X}", usb.vid, usb.pid)
            }),
            SerialPortType::PciPort => "PCI".to_string(),
            SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            SerialPortType::Unknown => "n/a".to_string(),
        };

        Self {
            name: info.port_name,
            description,
        }
    }
}

/// Lists the serial ports currently visible to the OS.
///
/// # Errors
///
/// Returns an error if the OS port enumeration fails.
pub fn list_ports() -> Result<Vec<PortListing>, ChannelError> {
    let ports = serialport::available_ports().map_err(ChannelError::Enumerate)?;
    Ok(ports.into_iter().map(PortListing::from).collect())
}
