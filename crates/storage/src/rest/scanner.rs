//! Server-side scanner over the REST gateway.
//!
//! The gateway hands out a scanner resource (its URL comes back in the
//! `Location` header) and pages it with `GET` until it answers `204 No
//! Content`. Batches are bounded by cell count, so one row can straddle two
//! pages; rows are merged back together before they are yielded. The
//! resource is deleted when the scanner is dropped, whether or not it was
//! read to the end.

use std::collections::VecDeque;

use tracing::{debug, warn};
use ureq::Agent;

use cellgate_core::{StoreError, StoreResult};

use super::cellset::{decode_rows, CellSet};
use super::status_error;
use crate::ops::RowResult;

pub(crate) struct RestScanner<'a> {
    agent: &'a Agent,
    location: String,
    buffered: VecDeque<RowResult>,
    pending: Option<RowResult>,
    exhausted: bool,
    remaining: usize,
}

impl<'a> RestScanner<'a> {
    pub fn new(agent: &'a Agent, location: String, limit: Option<usize>) -> Self {
        Self {
            agent,
            location,
            buffered: VecDeque::new(),
            pending: None,
            exhausted: false,
            remaining: limit.unwrap_or(usize::MAX),
        }
    }

    fn fetch(&mut self) -> StoreResult<()> {
        let response = self
            .agent
            .get(&self.location)
            .set("Accept", "application/json")
            .call()
            .map_err(status_error)?;

        if response.status() == 204 {
            self.exhausted = true;
            return Ok(());
        }

        let cell_set: CellSet = response
            .into_json()
            .map_err(|e| StoreError::Decode(format!("scanner batch: {}", e)))?;
        let rows = decode_rows(cell_set)?;
        if rows.is_empty() {
            self.exhausted = true;
        }
        self.buffered.extend(rows);
        Ok(())
    }

    fn emit(&mut self, row: RowResult) -> Option<StoreResult<RowResult>> {
        self.remaining -= 1;
        Some(Ok(row))
    }
}

impl Iterator for RestScanner<'_> {
    type Item = StoreResult<RowResult>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining == 0 {
                return None;
            }

            if let Some(row) = self.buffered.pop_front() {
                match self.pending.take() {
                    Some(mut current) if current.row() == row.row() => {
                        current.merge(row);
                        self.pending = Some(current);
                    }
                    Some(complete) => {
                        self.pending = Some(row);
                        return self.emit(complete);
                    }
                    None => self.pending = Some(row),
                }
                continue;
            }

            if self.exhausted {
                let last = self.pending.take()?;
                return self.emit(last);
            }

            if let Err(e) = self.fetch() {
                self.exhausted = true;
                self.pending = None;
                return Some(Err(e));
            }
        }
    }
}

impl Drop for RestScanner<'_> {
    fn drop(&mut self) {
        match self.agent.delete(&self.location).call() {
            Ok(_) => debug!(scanner = %self.location, "released scanner"),
            Err(e) => warn!(scanner = %self.location, error = %e, "failed to release scanner"),
        }
    }
}
