use std::{cell::RefCell, rc::Rc};

use prowl::{FieldSnapshot, Observer, Outcome, Result};

/// Everything a run reported through the observer port.
#[derive(Debug, Default)]
pub struct RunLog {
    pub ticks: usize,
    pub catches: Vec<String>,
    pub escapes: Vec<(String, bool)>,
    pub outcome: Option<Outcome>,
}

impl RunLog {
    pub fn successful_escapes(&self, name: &str) -> usize {
        self.escapes
            .iter()
            .filter(|(who, escaped)| who == name && *escaped)
            .count()
    }
}

/// Observer that records the event stream into a shared log.
pub struct RecordingObserver {
    log: Rc<RefCell<RunLog>>,
}

impl RecordingObserver {
    pub fn new() -> (Self, Rc<RefCell<RunLog>>) {
        let log = Rc::new(RefCell::new(RunLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl Observer for RecordingObserver {
    fn on_tick(&mut self, _step: usize, _snapshot: &FieldSnapshot) -> Result<()> {
        self.log.borrow_mut().ticks += 1;
        Ok(())
    }

    fn on_catch(&mut self, name: &str) -> Result<()> {
        self.log.borrow_mut().catches.push(name.to_string());
        Ok(())
    }

    fn on_escape(&mut self, name: &str, escaped: bool) -> Result<()> {
        self.log.borrow_mut().escapes.push((name.to_string(), escaped));
        Ok(())
    }

    fn on_finish(&mut self, outcome: &Outcome) -> Result<()> {
        self.log.borrow_mut().outcome = Some(*outcome);
        Ok(())
    }
}
