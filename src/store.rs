use crate::domain::{Filter, Task, TaskId, TaskPatch};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task {0} is already in the list")]
    DuplicateId(TaskId),
}

/// In-memory task list, the active filter, and the task being edited.
///
/// Operations that name a task by id quietly do nothing when the id is
/// unknown and report that through their `bool` return. Responses for
/// overlapping requests can reference tasks that are already gone.
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
    pending_edit: Option<TaskId>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list. Later duplicates of an id are dropped.
    pub fn load(&mut self, tasks: Vec<Task>) {
        let mut seen = HashSet::new();
        self.tasks = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id.clone()))
            .collect();
        self.drop_stale_edit();
    }

    pub fn append(&mut self, task: Task) -> Result<(), StoreError> {
        if self.position(&task.id).is_some() {
            return Err(StoreError::DuplicateId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn toggle_completed(&mut self, id: &TaskId) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);
        if self.pending_edit.as_ref() == Some(id) {
            self.pending_edit = None;
        }
        true
    }

    pub fn replace(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn set_all_completed(&mut self, value: bool) {
        for task in &mut self.tasks {
            task.completed = value;
        }
    }

    /// Remove every task matching `predicate`, returning how many went
    pub fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&Task) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|task| !predicate(task));
        self.drop_stale_edit();
        before - self.tasks.len()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.pending_edit = Some(id.clone());
        true
    }

    pub fn end_edit(&mut self) {
        self.pending_edit = None;
    }

    /// Tasks passing the current filter, in list order. The iterator is
    /// `Clone` so a renderer can walk it more than once.
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        let filter = self.filter;
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    /// `(completed, total)` over every task, ignoring the filter
    pub fn counts(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        (completed, self.tasks.len())
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn pending_edit(&self) -> Option<&TaskId> {
        self.pending_edit.as_ref()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn drop_stale_edit(&mut self) {
        if let Some(id) = &self.pending_edit {
            if self.position(id).is_none() {
                self.pending_edit = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> TaskId {
        TaskId::from(s)
    }

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.load(vec![
            Task::new("1", "a"),
            Task::new("2", "b").with_completed(true),
        ]);
        store
    }

    fn ids<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a str> {
        tasks.map(|task| task.id.as_str()).collect()
    }

    fn assert_unique_ids(store: &TaskStore) {
        let mut seen = HashSet::new();
        for task in store.tasks() {
            assert!(seen.insert(task.id.clone()), "duplicate id {}", task.id);
        }
    }

    #[test]
    fn test_counts_and_completed_filter() {
        let mut store = sample_store();
        assert_eq!(store.counts(), (1, 2));

        store.set_filter(Filter::Completed);
        let visible: Vec<&Task> = store.visible_tasks().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, id("2"));

        // Counts ignore the filter
        assert_eq!(store.counts(), (1, 2));
    }

    #[test]
    fn test_visible_tasks_per_filter_keep_order() {
        let mut store = TaskStore::new();
        store.load(vec![
            Task::new("1", "a").with_completed(true),
            Task::new("2", "b"),
            Task::new("3", "c").with_completed(true),
            Task::new("4", "d"),
        ]);

        assert_eq!(ids(store.visible_tasks()), vec!["1", "2", "3", "4"]);

        store.set_filter(Filter::Completed);
        assert_eq!(ids(store.visible_tasks()), vec!["1", "3"]);

        store.set_filter(Filter::Uncompleted);
        assert_eq!(ids(store.visible_tasks()), vec!["2", "4"]);
    }

    #[test]
    fn test_visible_tasks_is_restartable() {
        let mut store = sample_store();
        store.set_filter(Filter::Uncompleted);

        let visible = store.visible_tasks();
        let first: Vec<&Task> = visible.clone().collect();
        let second: Vec<&Task> = visible.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_append_then_remove_restores_list() {
        let mut store = sample_store();
        let before = store.tasks().to_vec();

        store.append(Task::new("3", "c")).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.remove(&id("3")));

        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut store = sample_store();
        let err = store.append(Task::new("1", "again")).unwrap_err();

        assert_eq!(err, StoreError::DuplicateId(id("1")));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&id("1")).unwrap().text, "a");
    }

    #[test]
    fn test_append_remove_sequences_keep_ids_unique() {
        let mut store = TaskStore::new();
        let ops = ["1", "2", "1", "3", "-2", "2", "2", "-1", "-1", "1", "3"];
        for op in ops {
            if let Some(target) = op.strip_prefix('-') {
                store.remove(&id(target));
            } else {
                let _ = store.append(Task::new(op, "x"));
            }
            assert_unique_ids(&store);
        }
        assert_eq!(ids(store.tasks().iter()), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let mut store = TaskStore::new();
        store.load(vec![
            Task::new("1", "first"),
            Task::new("2", "b"),
            Task::new("1", "second"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&id("1")).unwrap().text, "first");
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut store = sample_store();
        let before = store.tasks().to_vec();

        assert!(store.toggle_completed(&id("1")));
        assert!(store.get(&id("1")).unwrap().completed);
        assert!(store.toggle_completed(&id("1")));

        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut store = sample_store();
        let before = store.tasks().to_vec();

        assert!(!store.toggle_completed(&id("9")));
        assert!(!store.remove(&id("9")));
        assert!(!store.replace(&id("9"), TaskPatch::from(Task::new("9", "z"))));
        assert!(!store.begin_edit(&id("9")));

        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.pending_edit(), None);
    }

    #[test]
    fn test_replace_merges_patch() {
        let mut store = sample_store();
        let patch = TaskPatch {
            text: Some("renamed".to_string()),
            completed: None,
        };

        assert!(store.replace(&id("2"), patch));
        let task = store.get(&id("2")).unwrap();
        assert_eq!(task.text, "renamed");
        assert!(task.completed);
    }

    #[test]
    fn test_remove_clears_pending_edit() {
        let mut store = sample_store();
        assert!(store.begin_edit(&id("1")));
        assert_eq!(store.pending_edit(), Some(&id("1")));

        store.remove(&id("1"));
        assert_eq!(store.pending_edit(), None);
    }

    #[test]
    fn test_remove_other_task_keeps_pending_edit() {
        let mut store = sample_store();
        store.begin_edit(&id("1"));
        store.remove(&id("2"));
        assert_eq!(store.pending_edit(), Some(&id("1")));
    }

    #[test]
    fn test_set_all_completed_and_clear_completed() {
        let mut store = sample_store();
        store.append(Task::new("3", "c")).unwrap();

        store.set_all_completed(true);
        assert_eq!(store.counts(), (3, 3));

        store.toggle_completed(&id("3"));
        let removed = store.remove_where(|task| task.completed);
        assert_eq!(removed, 2);
        assert_eq!(ids(store.tasks().iter()), vec!["3"]);
    }

    #[test]
    fn test_remove_where_clears_pending_edit_of_removed_task() {
        let mut store = sample_store();
        store.begin_edit(&id("2"));
        store.remove_where(|task| task.completed);
        assert_eq!(store.pending_edit(), None);
    }

    #[test]
    fn test_load_clears_edit_of_missing_task() {
        let mut store = sample_store();
        store.begin_edit(&id("1"));
        store.load(vec![Task::new("2", "b")]);
        assert_eq!(store.pending_edit(), None);

        store.begin_edit(&id("2"));
        store.load(vec![Task::new("2", "b"), Task::new("5", "e")]);
        assert_eq!(store.pending_edit(), Some(&id("2")));
    }

    #[test]
    fn test_counts_stay_within_bounds() {
        let mut store = TaskStore::new();
        assert_eq!(store.counts(), (0, 0));

        for n in 0..6 {
            store.append(Task::new(n.to_string(), "t")).unwrap();
            if n % 2 == 0 {
                store.toggle_completed(&id(&n.to_string()));
            }
            let (completed, total) = store.counts();
            assert!(completed <= total);
        }
        assert_eq!(store.counts(), (3, 6));
    }
}
