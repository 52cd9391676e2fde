//! The status light state machine.
//!
//! Provides [`StatusLight`], which owns the current status, the button
//! bindings, the live animation and the idle-sync timer. The board's main
//! loop calls [`StatusLight::tick`] (or the four routines it runs) forever;
//! every routine returns quickly, and the only waits are the bounded line
//! reads on the network link.

use crate::animation::Animation;
use crate::collection::{BoundedMap, BoundedSeq};
use crate::color::Color;
use crate::config::{
    ACK_LINE, ApiConfig, ButtonConfig, HISTORY_LEN, LINE_BUFFER_LEN, MAX_BUTTONS,
    MAX_PREAMBLE_LINES,
};
use crate::debouncer::DebouncedSwitch;
use crate::led::LedStrip;
use crate::pin::{Pin, PinIo};
use crate::status::{Status, parse_payload_bytes};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::timer::Timer;
use crate::transport::{Connection, Link, ReadLine, TransportError, status_query};

/// Errors that can occur while registering a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// The pin is unset or not configured as an input.
    InvalidPin(Pin),
    /// All binding slots are taken by other statuses.
    TableFull,
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegisterError::InvalidPin(pin) => {
                write!(f, "pin {} cannot be used as a button input", pin)
            }
            RegisterError::TableFull => write!(f, "button binding table is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegisterError {}

/// Controls one status light: LEDs, buttons and the link to the status service.
///
/// All state lives in this value and is touched only from the caller's loop,
/// so no locking is involved. A status change made during one tick (by a
/// button, an inbound push or a sync response) shows on the next
/// [`render`](Self::render).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `IO` - Pin I/O implementation type
/// * `L` - LED strip implementation type
/// * `N` - Network link implementation type
/// * `B` - Maximum number of button bindings
pub struct StatusLight<'t, I, T, IO, L, N, const B: usize = MAX_BUTTONS>
where
    I: TimeInstant,
    T: TimeSource<I>,
    IO: PinIo,
    L: LedStrip,
    N: Link,
{
    api: ApiConfig,
    time_source: &'t T,
    io: IO,
    strip: L,
    link: N,
    buttons: BoundedMap<Status, DebouncedSwitch<I>, B>,
    status: Status,
    rendered_status: Status,
    animation: Animation<I>,
    idle_timer: Timer<I>,
    history: BoundedSeq<Status, HISTORY_LEN>,
}

impl<'t, I, T, IO, L, N, const B: usize> StatusLight<'t, I, T, IO, L, N, B>
where
    I: TimeInstant,
    T: TimeSource<I>,
    IO: PinIo,
    L: LedStrip,
    N: Link,
{
    /// Creates a controller with status `Undefined`, LEDs dark and idle sync off.
    pub fn new(api: ApiConfig, time_source: &'t T, io: IO, strip: L, link: N) -> Self {
        Self {
            api,
            time_source,
            io,
            strip,
            link,
            buttons: BoundedMap::new(Status::Undefined, DebouncedSwitch::unbound()),
            status: Status::Undefined,
            rendered_status: Status::Undefined,
            animation: Animation::Off,
            idle_timer: Timer::default(),
            history: BoundedSeq::new(Status::Undefined),
        }
    }

    /// Returns the authoritative status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Sets the authoritative status. `Undefined` is allowed and means "unknown".
    pub fn set_status(&mut self, status: Status) {
        if status != self.status {
            if self.history.is_full() {
                self.history.pop_front();
            }
            let _ = self.history.push_back(status);
        }
        self.status = status;
    }

    /// Returns the status the live animation was built for.
    pub fn rendered_status(&self) -> Status {
        self.rendered_status
    }

    pub fn animation(&self) -> &Animation<I> {
        &self.animation
    }

    /// Status changes, oldest first, up to `HISTORY_LEN` entries.
    pub fn history(&self) -> impl Iterator<Item = &Status> {
        self.history.iter()
    }

    /// Binds a button on `pin` to `status`.
    ///
    /// Re-registering a status replaces its binding. A button bound to
    /// `Undefined` requests the current status instead of setting one.
    ///
    /// # Errors
    /// * `InvalidPin` - The pin is unset or not an input
    /// * `TableFull` - `status` is new and all `B` slots are taken
    pub fn register_button(
        &mut self,
        status: Status,
        pin: Pin,
        threshold: I::Duration,
    ) -> Result<(), RegisterError> {
        if !pin.is_valid_input() {
            warn!("rejected button on invalid pin {}", pin);
            return Err(RegisterError::InvalidPin(pin));
        }

        self.buttons
            .set(status, DebouncedSwitch::new(pin, threshold))
            .map_err(|_| {
                warn!("no binding slot left for {}", status);
                RegisterError::TableFull
            })?;
        pin.setup(&mut self.io);
        debug!("button {} bound to {}", pin, status);
        Ok(())
    }

    /// Registers every button in `buttons`, stopping at the first failure.
    pub fn register_buttons(&mut self, buttons: &[ButtonConfig]) -> Result<(), RegisterError> {
        for button in buttons {
            let threshold = I::Duration::from_millis(button.debounce_ms);
            self.register_button(button.status, button.pin, threshold)?;
        }
        Ok(())
    }

    /// Returns the button bindings.
    pub fn buttons(&self) -> &BoundedMap<Status, DebouncedSwitch<I>, B> {
        &self.buttons
    }

    /// Sets how often [`sync_if_idle`](Self::sync_if_idle) pulls the status.
    ///
    /// A zero interval disables idle sync.
    pub fn configure_idle_interval(&mut self, interval: I::Duration) {
        self.idle_timer.set_duration(interval);
        self.idle_timer.reset();
    }

    /// Debounces every bound button and acts on the first fresh press.
    ///
    /// A press sends the bound status to the service right away. Buttons
    /// after the pressed one are left for the next tick.
    ///
    /// Returns the status bound to the pressed button, if any.
    pub fn poll_buttons(&mut self) -> Option<Status> {
        let now = self.time_source.now();
        let mut pressed = None;
        for (status, switch) in self.buttons.iter_mut() {
            switch.poll(&mut self.io, now);
            if switch.was_pressed() {
                pressed = Some(*status);
                break;
            }
        }

        let status = pressed?;
        info!("button pressed: {}", status);
        // Failures are logged in send_status_request; the light keeps its status.
        let _ = self.send_status_request(status);
        Some(status)
    }

    /// Renders one frame.
    ///
    /// Rebuilds the animation if the status changed since the last frame,
    /// samples it and floods the strip with the result.
    pub fn render(&mut self) -> Color {
        let now = self.time_source.now();
        if self.rendered_status != self.status {
            self.animation = Animation::for_status(self.status, now);
            self.rendered_status = self.status;
            debug!("animation for {}: {}", self.status, self.animation.kind());
        }

        let color = self.animation.color(now);
        self.strip.fill(color);
        self.strip.show();
        color
    }

    /// Serves one pending inbound push, if any.
    ///
    /// Lines are skipped until one starts with `{`. Every accepted
    /// connection is acknowledged, whether or not the payload parsed.
    ///
    /// Returns `None` if no connection was pending, otherwise the parsed
    /// status (`Undefined` if nothing was recognised).
    pub fn handle_inbound_request(&mut self) -> Option<Status> {
        let mut connection = self.link.accept()?;

        let mut buf = [0u8; LINE_BUFFER_LEN];
        let mut len = 0;
        for _ in 0..MAX_PREAMBLE_LINES {
            let read = connection.read_line(&mut buf, self.api.read_timeout_ms);
            if !read.is_empty() && buf[0] == b'{' {
                len = read.len();
                break;
            }
            if read.timed_out() {
                break;
            }
        }
        connection.respond(ACK_LINE);
        drop(connection);

        let status = parse_payload_bytes(&buf[..len]);
        debug!("inbound payload parsed as {}", status);
        self.adopt(status);
        Some(status)
    }

    /// Pulls the status once the idle interval has passed.
    ///
    /// Does nothing while idle sync is disabled. Returns true if a request
    /// was issued.
    pub fn sync_if_idle(&mut self) -> bool {
        if !self.idle_timer.is_set() {
            return false;
        }

        let now = self.time_source.now();
        self.idle_timer.start(now);
        if !self.idle_timer.check(now) {
            return false;
        }

        debug!("idle interval elapsed, refreshing registration");
        let _ = self.send_status_request(Status::Undefined);
        true
    }

    /// Pushes `status` to the service, or pulls the current one for `Undefined`.
    ///
    /// A status found in the response line is adopted. Any request restarts
    /// the idle timer.
    ///
    /// Returns the status parsed from the response (`Undefined` when the
    /// response was empty, timed out or unrecognised).
    ///
    /// # Errors
    /// * `QueryTooLong` - The configured endpoint does not fit the query buffer
    /// * `Unreachable` - The link could not issue the request
    pub fn send_status_request(&mut self, status: Status) -> Result<Status, TransportError> {
        let result = self.exchange(status);
        if self.idle_timer.is_set() {
            self.idle_timer.restart(self.time_source.now());
        }

        match result {
            Ok(received) => {
                self.adopt(received);
                Ok(received)
            }
            Err(err) => {
                warn!("status request failed: {}", err);
                Err(err)
            }
        }
    }

    /// Runs one loop iteration: buttons, LEDs, inbound push, idle sync.
    pub fn tick(&mut self) {
        self.poll_buttons();
        self.render();
        self.handle_inbound_request();
        self.sync_if_idle();
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn strip(&self) -> &L {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut L {
        &mut self.strip
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    pub fn link(&self) -> &N {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut N {
        &mut self.link
    }

    fn exchange(&mut self, status: Status) -> Result<Status, TransportError> {
        let query = status_query(&self.api, status)?;
        debug!("requesting {}", query.as_str());

        let mut response = self.link.get(&query)?;
        let mut buf = [0u8; LINE_BUFFER_LEN];
        let read = response.read_line(&mut buf, self.api.read_timeout_ms);
        let status = parse_payload_bytes(&buf[..read.len()]);
        debug!("response parsed as {} ({} bytes)", status, read.len());
        Ok(status)
    }

    fn adopt(&mut self, status: Status) {
        if !status.is_known() {
            return;
        }
        if status != self.status {
            info!("status {} -> {}", self.status, status);
        }
        self.set_status(status);
    }
}
