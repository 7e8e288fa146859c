use super::models::{Run, RunFields};
use super::{RunStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// A run store that keeps everything in a map, for exercising code that only needs the `RunStore` contract
#[derive(Default)]
pub struct MemoryRunStore {
    runs: BTreeMap<i32, Run>,
    last_id: i32,
}

impl RunStore for MemoryRunStore {
    fn create(&mut self, fields: RunFields) -> StoreResult<Run> {
        fields.validate()?;
        self.last_id += 1;
        let run = Run {
            id: self.last_id,
            test_name: fields.test_name,
            time_start: fields.time_start,
            time_end: fields.time_end,
            duration: fields.duration,
        };
        self.runs.insert(run.id, run.clone());
        Ok(run)
    }

    fn get(&mut self, id: i32) -> StoreResult<Run> {
        self.runs.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn list(&mut self) -> StoreResult<Vec<Run>> {
        Ok(self.runs.values().cloned().collect())
    }

    fn update(&mut self, id: i32, fields: RunFields) -> StoreResult<Run> {
        let run = self.runs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        fields.validate()?;
        run.test_name = fields.test_name;
        run.time_start = fields.time_start;
        run.time_end = fields.time_end;
        run.duration = fields.duration;
        Ok(run.clone())
    }

    fn delete(&mut self, id: i32) -> StoreResult<()> {
        self.runs
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
