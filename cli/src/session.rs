use std::io::Write;

use anyhow::Result;
use cubesweeper_core::{GridEngine, RevealOutcome};

use crate::command::{Command, HELP};
use crate::render::Layers;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Stands in for the renderer: feeds commands to the engine and prints frames.
pub struct Session {
    engine: GridEngine,
    json: bool,
}

impl Session {
    pub fn new(engine: GridEngine, json: bool) -> Self {
        Self { engine, json }
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        log::debug!("Executing {:?}", command);

        match command {
            Command::Reveal(coords) => {
                let outcome = self.engine.primary_click(coords);
                if outcome.has_update() {
                    self.print_frame(out)?;
                }
                match outcome {
                    RevealOutcome::NoChange => writeln!(out, "Nothing to reveal at {coords:?}")?,
                    RevealOutcome::Revealed => {}
                    RevealOutcome::HitMine => writeln!(out, "You lose!")?,
                    RevealOutcome::Won => writeln!(out, "You won!")?,
                }
            }
            Command::Flag(coords) => {
                let outcome = self.engine.secondary_click(coords);
                if outcome.has_update() {
                    self.print_frame(out)?;
                } else {
                    writeln!(out, "Cannot flag {coords:?} right now")?;
                }
            }
            Command::Hover(coords) => {
                self.engine.hover(coords);
                if self.json {
                    self.print_frame(out)?;
                }
            }
            Command::Tick(delta_secs) => {
                let changed = self.engine.advance_animations(delta_secs);
                let animating = self
                    .engine
                    .cells()
                    .filter(|cell| cell.animation().active)
                    .count();
                if self.json && changed {
                    self.print_frame(out)?;
                }
                writeln!(out, "{animating} blocks still animating")?;
            }
            Command::Size(size) => match self.engine.config().with_size(size) {
                Ok(config) => {
                    self.engine.configure(config);
                    self.print_frame(out)?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Mines(mines) => match self.engine.generate(self.engine.size(), mines) {
                Ok(()) => self.print_frame(out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::New => {
                self.engine.regenerate();
                self.print_frame(out)?;
            }
            Command::Show => self.print_frame(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn print_frame(&self, out: &mut impl Write) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, &self.engine.snapshot())?;
            writeln!(out)?;
        } else {
            write!(out, "{}", Layers(&self.engine))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesweeper_core::{EngineState, GridConfig, MineLayout};

    fn session(json: bool) -> Session {
        let layout = MineLayout::from_mine_coords((3, 1, 1), &[(2, 0, 0)]).unwrap();
        Session::new(GridEngine::with_layout(layout, 0).unwrap(), json)
    }

    fn run(session: &mut Session, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = session.execute(line.parse().unwrap(), &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reveal_reports_win() {
        let mut session = session(false);

        let (flow, text) = run(&mut session, "reveal 0 0 0");

        assert_eq!(flow, Flow::Continue);
        assert!(text.starts_with("Won | 3x1x1"));
        assert!(text.contains("  .1#"));
        assert!(text.ends_with("You won!\n"));
    }

    #[test]
    fn mine_reports_loss_and_blocks_input() {
        let mut session = session(false);

        let (_, text) = run(&mut session, "r 2 0 0");
        assert!(text.ends_with("You lose!\n"));

        let (_, text) = run(&mut session, "f 0 0 0");
        assert_eq!(text, "Cannot flag (0, 0, 0) right now\n");
        assert_eq!(session.engine().state(), EngineState::Lost);
    }

    #[test]
    fn repeated_reveal_only_reports() {
        let mut session = session(false);
        run(&mut session, "reveal 0 0 0");

        let (_, text) = run(&mut session, "reveal 0 0 0");
        assert_eq!(text, "Nothing to reveal at (0, 0, 0)\n");
    }

    #[test]
    fn invalid_mine_count_is_reported() {
        let mut session = session(false);

        let (flow, text) = run(&mut session, "mines 9");

        assert_eq!(flow, Flow::Continue);
        assert!(text.starts_with("Invalid configuration"));
        assert_eq!(session.engine().size(), (3, 1, 1));
    }

    #[test]
    fn resize_resets_mine_count() {
        let mut session = session(false);

        run(&mut session, "size 10 10 2");

        let config = session.engine().config();
        assert_eq!(config, GridConfig::new((10, 10, 2), 20).unwrap());
        assert!(!session.engine().mines_placed());
    }

    #[test]
    fn json_mode_prints_snapshots() {
        let mut session = session(true);

        let (_, text) = run(&mut session, "show");
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();

        assert_eq!(value["cells"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["state"], "Ready");
    }

    #[test]
    fn tick_counts_running_animations() {
        let mut session = session(false);
        run(&mut session, "reveal 0 0 0");

        let (_, text) = run(&mut session, "tick 1");
        assert_eq!(text, "0 blocks still animating\n");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = session(false);
        assert_eq!(run(&mut session, "quit").0, Flow::Quit);
    }
}
