//! Client driver.
//!
//! One task owns the session, the typing detector and the UI, and serializes
//! every reaction through a single `tokio::select!` loop:
//! - outbound queue -> transport
//! - transport -> dispatcher
//! - typing tick -> `typing: false` after the quiet period
//! - operator commands -> session sends

use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use wschat_core::error::{ChatError, Result};

use crate::config::ClientConfig;
use crate::dispatch::dispatch_text;
use crate::session::{Channel, ConnState, Session};
use crate::transport::{client_request, Transport, WsTransport};
use crate::typing::TypingDetector;
use crate::ui::ChatUi;

/// Operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Keystroke,
    SwitchRoom(String),
    CreateRoom(String),
    /// `None` clears the current room.
    ClearRoom(Option<String>),
    Reconnect,
    Quit,
}

impl Command {
    /// Map one line of terminal input. Blank lines yield nothing.
    pub fn parse_line(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };
        let cmd = match (head, rest) {
            ("/quit", "") => Command::Quit,
            ("/reconnect", "") => Command::Reconnect,
            ("/room", name) if !name.is_empty() => Command::SwitchRoom(name.to_owned()),
            ("/create", name) if !name.is_empty() => Command::CreateRoom(name.to_owned()),
            ("/clear", "") => Command::ClearRoom(None),
            ("/clear", name) => Command::ClearRoom(Some(name.to_owned())),
            _ => Command::Say(line.to_owned()),
        };
        Some(cmd)
    }
}

/// Why a connection loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Transport closed or failed; waiting for the operator.
    Closed,
    Quit,
    Reconnect,
}

pub struct ChatClient<U: ChatUi> {
    cfg: ClientConfig,
    session: Session,
    typing: TypingDetector,
    ui: U,
}

impl<U: ChatUi> ChatClient<U> {
    pub fn new(cfg: ClientConfig, ui: U) -> Self {
        let session = Session::new(cfg.user.username.clone(), &cfg.user.room_name)
            .with_subscriptions(cfg.user.subscribe_for_events.clone());
        let typing = TypingDetector::from_config(&cfg.typing);
        Self {
            cfg,
            session,
            typing,
            ui,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn into_ui(self) -> U {
        self.ui
    }

    /// Connect and serve until `Quit` (or the command source is dropped).
    ///
    /// Only a URL that cannot become a request is fatal; handshake and
    /// socket failures are raised as notices and the client waits for
    /// `Reconnect`.
    pub async fn run(&mut self, commands: &mut mpsc::Receiver<Command>) -> Result<()> {
        loop {
            let url = self.cfg.server.ws_url(self.session.room_name());
            let request = client_request(&url)?;

            self.session.begin_connect();
            let exit = match WsTransport::open(request).await {
                Ok(transport) => self.drive(transport, commands).await,
                Err(e) => {
                    self.on_transport_error(&e);
                    self.teardown();
                    Exit::Closed
                }
            };

            let exit = match exit {
                Exit::Closed => self.idle(commands).await,
                other => other,
            };
            match exit {
                Exit::Reconnect => info!(%url, "reconnecting"),
                _ => return Ok(()),
            }
        }
    }

    /// Serve one open transport until it closes or the operator leaves.
    pub async fn drive<T: Transport>(
        &mut self,
        mut transport: T,
        commands: &mut mpsc::Receiver<Command>,
    ) -> Exit {
        if self.session.state() != ConnState::Connecting {
            self.session.begin_connect();
        }

        let (tx, mut rx) = mpsc::channel::<String>(self.cfg.session.outbound_queue);
        if let Err(e) = self.session.on_open(Channel::new(tx)) {
            self.on_transport_error(&e);
            self.teardown();
            return Exit::Closed;
        }

        let mut tick = interval(self.typing.poll_interval());
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let exit = loop {
            tokio::select! {
                Some(frame) = rx.recv() => {
                    if let Err(e) = transport.send(frame).await {
                        self.on_transport_error(&e);
                        break Exit::Closed;
                    }
                }
                inbound = transport.recv() => match inbound {
                    Some(Ok(text)) => self.on_frame(&text),
                    Some(Err(e @ ChatError::MalformedFrame(_))) => {
                        warn!(error = %e, "dropping frame");
                    }
                    Some(Err(e)) => {
                        self.on_transport_error(&e);
                        break Exit::Closed;
                    }
                    None => {
                        info!(user = %self.session.username(), "connection closed by peer");
                        break Exit::Closed;
                    }
                },
                _ = tick.tick() => self.on_tick(),
                cmd = commands.recv() => match cmd {
                    None | Some(Command::Quit) => {
                        flush(&mut rx, &mut transport).await;
                        close(&mut transport).await;
                        break Exit::Quit;
                    }
                    Some(Command::Reconnect) => {
                        close(&mut transport).await;
                        break Exit::Reconnect;
                    }
                    Some(cmd) => self.handle_command(cmd),
                },
            }
        };

        self.teardown();
        exit
    }

    /// Closed state: commands still run (and fail with `NotConnected`).
    async fn idle(&mut self, commands: &mut mpsc::Receiver<Command>) -> Exit {
        while let Some(cmd) = commands.recv().await {
            match cmd {
                Command::Quit => return Exit::Quit,
                Command::Reconnect => return Exit::Reconnect,
                other => self.handle_command(other),
            }
        }
        Exit::Quit
    }

    fn handle_command(&mut self, cmd: Command) {
        let res = match cmd {
            Command::Say(text) => self.session.send(&text),
            Command::Keystroke => self.on_keystroke(),
            Command::SwitchRoom(room) => self.session.send_room_switch(&room),
            Command::CreateRoom(room) => self.session.send_room_create(&room),
            Command::ClearRoom(room) => {
                let room = room.unwrap_or_else(|| self.session.room_name().to_owned());
                self.session.send_room_chat_clear(&room)
            }
            Command::Reconnect | Command::Quit => Ok(()),
        };
        if let Err(e) = res {
            warn!(code = e.code().as_str(), error = %e, "command failed");
            self.ui.raise_notice(&e.to_string(), e.severity());
        }
    }

    fn on_keystroke(&mut self) -> Result<()> {
        if !self.session.is_connected() {
            return Ok(());
        }
        match self.typing.on_keystroke(Instant::now()) {
            Some(is_typing) => self.session.send_typing(is_typing),
            None => Ok(()),
        }
    }

    fn on_tick(&mut self) {
        if !self.session.is_connected() {
            return;
        }
        if let Some(is_typing) = self.typing.poll(Instant::now()) {
            if let Err(e) = self.session.send_typing(is_typing) {
                warn!(code = e.code().as_str(), error = %e, "typing update failed");
            }
        }
    }

    fn on_frame(&mut self, text: &str) {
        if let Err(e) = dispatch_text(&mut self.session, text, &mut self.ui) {
            warn!(code = e.code().as_str(), error = %e, "dropping frame");
        }
    }

    fn on_transport_error(&mut self, e: &ChatError) {
        error!(code = e.code().as_str(), error = %e, "transport failure");
        self.ui.raise_notice(&e.to_string(), e.severity());
    }

    fn teardown(&mut self) {
        self.session.on_close();
        self.typing.reset();
    }
}

async fn flush<T: Transport>(rx: &mut mpsc::Receiver<String>, transport: &mut T) {
    while let Ok(frame) = rx.try_recv() {
        if let Err(e) = transport.send(frame).await {
            warn!(error = %e, "flush aborted");
            return;
        }
    }
}

async fn close<T: Transport>(transport: &mut T) {
    if let Err(e) = transport.close().await {
        debug!(error = %e, "close failed");
    }
}
