//! Background job plumbing for the controller.
//!
//! The classify call blocks on the network, so it runs on a spawned worker
//! thread and reports back over an mpsc channel the controller drains once
//! per frame. Jobs carry a request token; an outcome whose token no longer
//! matches the active request is discarded.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::classifier::{self, Classification, ClassifyError};

/// Everything the worker thread needs to issue one classify call.
pub(crate) struct ClassifyJob {
    pub(crate) base_url: String,
    pub(crate) file_name: String,
    pub(crate) bytes: Vec<u8>,
}

pub(crate) struct ClassifyOutcome {
    request_id: u64,
    pub(crate) result: Result<Classification, ClassifyError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<ClassifyOutcome>,
    message_rx: Receiver<ClassifyOutcome>,
    classify_in_flight: bool,
    active_request_id: Option<u64>,
    next_request_id: u64,
}

impl ControllerJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            classify_in_flight: false,
            active_request_id: None,
            next_request_id: 1,
        }
    }

    pub(crate) fn classify_in_flight(&self) -> bool {
        self.classify_in_flight
    }

    /// Spawn the classify worker. Returns false when a request is already
    /// outstanding; the caller treats that as a no-op.
    pub(crate) fn begin_classify(&mut self, job: ClassifyJob) -> bool {
        if self.classify_in_flight {
            return false;
        }
        self.classify_in_flight = true;
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        self.active_request_id = Some(request_id);

        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = classifier::classify(&job.base_url, &job.file_name, &job.bytes);
            let _ = tx.send(ClassifyOutcome { request_id, result });
        });
        true
    }

    /// Drain the next outcome for the active request, dropping stale ones.
    pub(crate) fn try_recv(&mut self) -> Option<ClassifyOutcome> {
        loop {
            let outcome = match self.message_rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            };
            if Some(outcome.request_id) != self.active_request_id {
                continue;
            }
            self.classify_in_flight = false;
            self.active_request_id = None;
            return Some(outcome);
        }
    }
}
