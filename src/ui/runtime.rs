//! Terminal event loop.
//!
//! A dedicated thread polls for input and forwards events over a
//! channel; the main loop drains events, advances debounce windows,
//! pumps fetch results, and redraws at a fixed cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use crate::api::ApiClient;
use crate::ui::app::App;

const INPUT_POLL: Duration = Duration::from_millis(50);
const FRAME_SLEEP: Duration = Duration::from_millis(16);

pub fn run(api: Arc<ApiClient>) -> Result<()> {
	let mut app = App::new(api);
	let mut terminal = ratatui::init();
	terminal.clear()?;

	let (event_tx, event_rx) = mpsc::channel();
	let event_loop_running = Arc::new(AtomicBool::new(true));
	let event_loop_flag = Arc::clone(&event_loop_running);

	let event_thread = thread::spawn(move || -> Result<()> {
		while event_loop_flag.load(Ordering::Relaxed) {
			if event::poll(INPUT_POLL)? {
				let event = event::read()?;
				if event_tx.send(event).is_err() {
					break;
				}
			}
		}
		Ok(())
	});

	let result: Result<()> = 'event_loop: loop {
		loop {
			match event_rx.try_recv() {
				Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
					app.handle_key(key, Instant::now());
				}
				Ok(_) => {}
				Err(mpsc::TryRecvError::Empty) => break,
				Err(mpsc::TryRecvError::Disconnected) => {
					break 'event_loop Err(anyhow!("input event channel disconnected"));
				}
			}
		}

		if app.should_quit {
			break Ok(());
		}

		app.tick(Instant::now());
		app.pump();
		app.throbber.calc_next();

		terminal.draw(|frame| app.draw(frame))?;

		thread::sleep(FRAME_SLEEP);
	};

	ratatui::restore();

	event_loop_running.store(false, Ordering::Relaxed);
	match event_thread.join() {
		Ok(join_result) => join_result?,
		Err(err) => std::panic::resume_unwind(err),
	}

	result
}
