//! Wired-AND bus simulation for tests
//!
//! Models the two shared wires, the master's pins, and any number of
//! register-file slaves. Every pin change settles the bus and delivers
//! clock edges and START/STOP conditions to the slaves, so the master
//! under test sees the same levels it would on real hardware.

use core::cell::RefCell;

use horologe_hal::{OpenDrainPin, TickSource};

use super::engine::SoftI2c;

/// Stretch that never ends on its own
pub(crate) const FOREVER: u32 = u32::MAX;

const REGISTER_COUNT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Receive { byte: u8, bits: u8 },
    AckOut,
    Transmit { byte: u8, bits: u8 },
    AckIn { acked: bool },
}

/// Register-file slave with an auto-incrementing pointer
///
/// The first byte written after the address sets the pointer; later bytes
/// are stored at the pointer. Reads return bytes from the pointer.
pub(crate) struct SimDevice {
    address: u8,
    pub registers: [u8; REGISTER_COUNT],
    pointer: usize,
    phase: Phase,
    first_byte: bool,
    reading: bool,
    data_bytes: usize,
    drives_sda_low: bool,
    /// Data bytes the master wrote, in order
    pub received: Vec<u8>,
    /// Refuse the data byte after this many have been accepted
    pub nack_after: Option<usize>,
}

impl SimDevice {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; REGISTER_COUNT],
            pointer: 0,
            phase: Phase::Idle,
            first_byte: false,
            reading: false,
            data_bytes: 0,
            drives_sda_low: false,
            received: Vec::new(),
            nack_after: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle && !self.drives_sda_low
    }

    fn on_start(&mut self) {
        self.phase = Phase::Receive { byte: 0, bits: 0 };
        self.first_byte = true;
        self.data_bytes = 0;
        self.drives_sda_low = false;
    }

    fn on_stop(&mut self) {
        self.phase = Phase::Idle;
        self.drives_sda_low = false;
    }

    fn on_clock_rise(&mut self, sda: bool) {
        self.phase = match self.phase {
            Phase::Receive { byte, bits } if bits < 8 => Phase::Receive {
                byte: (byte << 1) | sda as u8,
                bits: bits + 1,
            },
            Phase::Transmit { byte, bits } => Phase::Transmit {
                byte,
                bits: bits + 1,
            },
            Phase::AckIn { .. } => Phase::AckIn { acked: !sda },
            other => other,
        };
    }

    fn on_clock_fall(&mut self) {
        match self.phase {
            Phase::Receive { byte, bits: 8 } => {
                if self.accept(byte) {
                    self.drives_sda_low = true;
                    self.phase = Phase::AckOut;
                } else {
                    self.phase = Phase::Idle;
                }
            }
            Phase::AckOut => {
                self.drives_sda_low = false;
                if self.reading {
                    self.send_next();
                } else {
                    self.phase = Phase::Receive { byte: 0, bits: 0 };
                }
            }
            Phase::Transmit { bits: 8, .. } => {
                self.drives_sda_low = false;
                self.phase = Phase::AckIn { acked: false };
            }
            Phase::Transmit { byte, bits } => {
                self.drives_sda_low = byte & (0x80 >> bits) == 0;
            }
            Phase::AckIn { acked: true } => self.send_next(),
            Phase::AckIn { acked: false } => self.phase = Phase::Idle,
            _ => {}
        }
    }

    fn accept(&mut self, byte: u8) -> bool {
        if self.first_byte {
            self.first_byte = false;
            if byte >> 1 != self.address {
                return false;
            }
            self.reading = byte & 1 == 1;
            return true;
        }

        if self.nack_after.is_some_and(|limit| self.data_bytes >= limit) {
            return false;
        }

        self.received.push(byte);
        if self.data_bytes == 0 {
            self.pointer = byte as usize % REGISTER_COUNT;
        } else {
            self.registers[self.pointer] = byte;
            self.pointer = (self.pointer + 1) % REGISTER_COUNT;
        }
        self.data_bytes += 1;
        true
    }

    fn send_next(&mut self) {
        let byte = self.registers[self.pointer];
        self.pointer = (self.pointer + 1) % REGISTER_COUNT;
        self.drives_sda_low = byte & 0x80 == 0;
        self.phase = Phase::Transmit { byte, bits: 0 };
    }
}

/// The shared wires plus everything attached to them
pub(crate) struct SimBus {
    master_scl_low: bool,
    master_sda_low: bool,
    scl: bool,
    sda: bool,
    pub devices: Vec<SimDevice>,
    /// Rising clock edges seen
    pub clock_pulses: u32,
    pub starts: u32,
    pub stops: u32,
    falls: u32,
    stretch_at: Option<u32>,
    stretch_polls: u32,
    stretching: bool,
    stuck_falls: Option<u32>,
    now: u32,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            master_scl_low: false,
            master_sda_low: false,
            scl: true,
            sda: true,
            devices: Vec::new(),
            clock_pulses: 0,
            starts: 0,
            stops: 0,
            falls: 0,
            stretch_at: None,
            stretch_polls: 0,
            stretching: false,
            stuck_falls: None,
            // Close to the top so timeouts cross the counter wrap
            now: u32::MAX - 500,
        }
    }

    pub fn add_device(&mut self, device: SimDevice) {
        self.devices.push(device);
    }

    /// Hold the clock low from the `n`th falling edge after this call,
    /// for `polls` master samples of the clock
    pub fn stretch_on_fall(&mut self, n: u32, polls: u32) {
        self.stretch_at = Some(self.falls + n);
        self.stretch_polls = polls;
    }

    /// Start holding the clock low immediately, for `polls` master samples
    pub fn hold_clock(&mut self, polls: u32) {
        self.stretching = true;
        self.stretch_polls = polls;
        self.settle();
    }

    /// Hold the data line low until `falls` more falling clock edges
    pub fn hold_data_low_for(&mut self, falls: u32) {
        self.stuck_falls = Some(falls);
        self.settle();
    }

    pub fn end_stretch(&mut self) {
        self.stretching = false;
        self.stretch_at = None;
        self.settle();
    }

    pub fn master_released(&self) -> bool {
        !self.master_scl_low && !self.master_sda_low
    }

    pub fn lines_idle(&self) -> bool {
        self.scl && self.sda
    }

    pub fn now(&self) -> u32 {
        self.now
    }

    fn sample_clock(&mut self) -> bool {
        if self.stretching && self.stretch_polls != FOREVER {
            if self.stretch_polls == 0 {
                self.stretching = false;
                self.settle();
            } else {
                self.stretch_polls -= 1;
            }
        }
        self.scl
    }

    fn settle(&mut self) {
        loop {
            let scl = !(self.master_scl_low || self.stretching);
            let sda = !(self.master_sda_low
                || self.stuck_falls.is_some()
                || self.devices.iter().any(|d| d.drives_sda_low));

            if scl != self.scl {
                self.scl = scl;
                if scl {
                    self.clock_pulses += 1;
                    let level = self.sda;
                    self.devices.iter_mut().for_each(|d| d.on_clock_rise(level));
                } else {
                    self.on_fall();
                }
                continue;
            }

            if sda != self.sda {
                self.sda = sda;
                if self.scl {
                    if sda {
                        self.stops += 1;
                        self.devices.iter_mut().for_each(SimDevice::on_stop);
                    } else {
                        self.starts += 1;
                        self.devices.iter_mut().for_each(SimDevice::on_start);
                    }
                }
                continue;
            }

            break;
        }
    }

    fn on_fall(&mut self) {
        self.falls += 1;

        self.stuck_falls = match self.stuck_falls {
            Some(n) if n > 1 => Some(n - 1),
            _ => None,
        };

        if self.stretch_at == Some(self.falls) {
            self.stretch_at = None;
            self.stretching = true;
        }

        self.devices.iter_mut().for_each(SimDevice::on_clock_fall);
    }
}

#[derive(Clone, Copy)]
enum Wire {
    Clock,
    Data,
}

/// One of the master's two pins
pub(crate) struct SimPin<'a> {
    bus: &'a RefCell<SimBus>,
    wire: Wire,
}

impl OpenDrainPin for SimPin<'_> {
    fn release(&mut self) {
        let mut bus = self.bus.borrow_mut();
        match self.wire {
            Wire::Clock => bus.master_scl_low = false,
            Wire::Data => bus.master_sda_low = false,
        }
        bus.settle();
    }

    fn drive_low(&mut self) {
        let mut bus = self.bus.borrow_mut();
        match self.wire {
            Wire::Clock => bus.master_scl_low = true,
            Wire::Data => bus.master_sda_low = true,
        }
        bus.settle();
    }

    fn is_high(&mut self) -> bool {
        let mut bus = self.bus.borrow_mut();
        match self.wire {
            Wire::Clock => bus.sample_clock(),
            Wire::Data => bus.sda,
        }
    }
}

/// Tick source that advances one microsecond per read
pub(crate) struct SimTicks<'a> {
    bus: &'a RefCell<SimBus>,
}

impl TickSource for SimTicks<'_> {
    fn now(&self) -> u32 {
        let mut bus = self.bus.borrow_mut();
        bus.now = bus.now.wrapping_add(1);
        bus.now
    }

    fn ticks_per_us(&self) -> u32 {
        1
    }
}

pub(crate) type SimI2c<'a> = SoftI2c<SimPin<'a>, SimPin<'a>, SimTicks<'a>>;

/// Bus master wired to the simulated bus
pub(crate) fn master(bus: &RefCell<SimBus>) -> SimI2c<'_> {
    SoftI2c::new(
        SimPin {
            bus,
            wire: Wire::Clock,
        },
        SimPin {
            bus,
            wire: Wire::Data,
        },
        SimTicks { bus },
    )
}
