use chrono::{Duration, TimeZone, Utc};
use todo_core::{
    Category, Clock, KeyValueStore, ManualClock, MemoryKeyValueStore, NewTodo, StoreConfig,
    TodoPatch, TodoStore,
};

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap())
}

fn titles<S: KeyValueStore, C: Clock>(store: &TodoStore<S, C>) -> Vec<String> {
    let mut todos: Vec<_> = store.todos().iter().collect();
    todos.sort_by_key(|todo| todo.order);
    todos.into_iter().map(|todo| todo.title.clone()).collect()
}

#[test]
fn create_appends_with_order_equal_to_previous_size() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());

    for (expected_order, title) in ["first", "second", "third"].into_iter().enumerate() {
        let before = store.len();
        let todo = store
            .create(NewTodo::new(title, Category::Projects))
            .unwrap();
        assert_eq!(todo.order, expected_order);
        assert_eq!(todo.order, before);
        assert_eq!(store.len(), before + 1);
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }
}

#[test]
fn blank_title_never_changes_collection() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());
    store.create(NewTodo::new("keep", Category::Work)).unwrap();

    for blank in ["", "   ", "\t\n"] {
        assert!(store.create(NewTodo::new(blank, Category::Work)).is_none());
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn create_trims_title_and_description_and_generates_unique_ids() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());

    let a = store
        .create(NewTodo::new("  Write notes ", Category::Gate).description("  chapter 3  "))
        .unwrap();
    let b = store.create(NewTodo::new("Write notes", Category::Gate)).unwrap();

    assert_eq!(a.title, "Write notes");
    assert_eq!(a.description, "chapter 3");
    assert_ne!(a.id, b.id);
}

#[test]
fn update_merges_fields_and_stamps_updated_at() {
    let storage = MemoryKeyValueStore::new();
    let clock = clock();
    let mut store = TodoStore::open(&storage, &clock, StoreConfig::default());
    let todo = store.create(NewTodo::new("draft", Category::Personal)).unwrap();

    clock.advance(Duration::minutes(3));
    assert!(store.update(
        &todo.id,
        TodoPatch {
            title: Some(" final ".to_string()),
            category: Some(Category::Work),
            ..TodoPatch::default()
        },
    ));

    let updated = store.get(&todo.id).unwrap();
    assert_eq!(updated.title, "final");
    assert_eq!(updated.category, Category::Work);
    assert_eq!(updated.created_at, todo.created_at);
    assert_eq!(updated.updated_at, todo.created_at + Duration::minutes(3));

    // An empty patch still stamps updated_at.
    clock.advance(Duration::minutes(1));
    assert!(store.update(&todo.id, TodoPatch::default()));
    assert_eq!(
        store.get(&todo.id).unwrap().updated_at,
        todo.created_at + Duration::minutes(4)
    );
}

#[test]
fn update_rejects_blank_title_and_unknown_id() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());
    let todo = store.create(NewTodo::new("keep me", Category::Ml)).unwrap();

    let blank = TodoPatch {
        title: Some("  ".to_string()),
        category: Some(Category::Work),
        ..TodoPatch::default()
    };
    assert!(!store.update(&todo.id, blank));
    assert_eq!(store.get(&todo.id).unwrap(), &todo);

    assert!(!store.update("missing", TodoPatch::default()));
}

#[test]
fn toggle_twice_restores_flag_and_stamps_each_time() {
    let storage = MemoryKeyValueStore::new();
    let clock = clock();
    let mut store = TodoStore::open(&storage, &clock, StoreConfig::default());
    let todo = store.create(NewTodo::new("flip", Category::Work)).unwrap();

    clock.advance(Duration::seconds(10));
    assert!(store.toggle_completed(&todo.id));
    let first = store.get(&todo.id).unwrap().clone();
    assert!(first.completed);
    assert!(first.updated_at > todo.updated_at);

    clock.advance(Duration::seconds(10));
    assert!(store.toggle_completed(&todo.id));
    let second = store.get(&todo.id).unwrap();
    assert_eq!(second.completed, todo.completed);
    assert!(second.updated_at > first.updated_at);

    assert!(!store.toggle_completed("missing"));
}

#[test]
fn delete_keeps_remaining_order_values() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());
    let a = store.create(NewTodo::new("A", Category::Work)).unwrap();
    let b = store.create(NewTodo::new("B", Category::Work)).unwrap();
    let c = store.create(NewTodo::new("C", Category::Work)).unwrap();

    assert!(store.delete(&b.id));
    assert!(!store.delete(&b.id));

    assert_eq!(store.get(&a.id).unwrap().order, 0);
    assert_eq!(store.get(&c.id).unwrap().order, 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn reorder_moves_first_to_last() {
    let storage = MemoryKeyValueStore::new();
    let clock = clock();
    let mut store = TodoStore::open(&storage, &clock, StoreConfig::default());
    for title in ["A", "B", "C"] {
        store.create(NewTodo::new(title, Category::Work)).unwrap();
    }

    clock.advance(Duration::minutes(1));
    assert!(store.reorder(0, 2));

    assert_eq!(titles(&store), ["B", "C", "A"]);
    let orders: Vec<usize> = store.todos().iter().map(|todo| todo.order).collect();
    assert_eq!(orders, [0, 1, 2]);
    assert!(store.todos().iter().all(|todo| todo.updated_at == clock.now()));
}

#[test]
fn reorder_then_inverse_restores_manual_order() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());
    for title in ["A", "B", "C", "D", "E"] {
        store.create(NewTodo::new(title, Category::Ml)).unwrap();
    }
    let original: Vec<(String, usize)> = store
        .todos()
        .iter()
        .map(|todo| (todo.id.clone(), todo.order))
        .collect();

    for (i, j) in [(0, 4), (3, 1), (2, 3)] {
        assert!(store.reorder(i, j));
        assert!(store.reorder(j, i));
        let restored: Vec<(String, usize)> = store
            .todos()
            .iter()
            .map(|todo| (todo.id.clone(), todo.order))
            .collect();
        assert_eq!(restored, original);
    }
}

#[test]
fn reorder_same_index_is_noop() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());
    let todo = store.create(NewTodo::new("A", Category::Ml)).unwrap();
    store.create(NewTodo::new("B", Category::Ml)).unwrap();

    assert!(!store.reorder(1, 1));
    assert_eq!(store.get(&todo.id).unwrap(), &todo);
}

#[test]
fn clear_completed_removes_only_completed() {
    let storage = MemoryKeyValueStore::new();
    let mut store = TodoStore::open(&storage, clock(), StoreConfig::default());
    let ids: Vec<String> = (0..5)
        .map(|i| {
            store
                .create(NewTodo::new(format!("task {i}"), Category::Personal))
                .unwrap()
                .id
        })
        .collect();
    store.toggle_completed(&ids[1]);
    store.toggle_completed(&ids[3]);

    assert_eq!(store.clear_completed(), 2);
    assert_eq!(store.len(), 3);
    assert!(store.todos().iter().all(|todo| !todo.completed));
    assert_eq!(store.clear_completed(), 0);
}
