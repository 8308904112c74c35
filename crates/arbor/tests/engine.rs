use std::cell::Cell;
use std::rc::Rc;

use arbor::prelude::*;

struct Ticks {
    count: Rc<Cell<u32>>,
}

impl Object for Ticks {
    fn update(&mut self, _dt: f64) {
        self.count.set(self.count.get() + 1);
    }
}

#[test]
fn test_systems_can_own_subtrees() {
    let mut engine = Engine::new();
    let audio = engine.add_system("audio", Ticks { count: Rc::default() }).unwrap();
    let music = engine.tree_mut().spawn_child(audio, Node::new("music")).unwrap();
    engine.tree_mut().spawn_child(music, Node::new("track-1")).unwrap();

    assert_eq!(engine.tree().len(), 4);
    assert_eq!(engine.system("audio").unwrap().descendants().count(), 2);

    // Subsystems are not looked up from the root
    assert!(matches!(
        engine.system("music"),
        Err(EngineError::Scene(SceneError::NodeNotFound { .. }))
    ));

    assert_eq!(engine.remove_system("audio"), Ok(3));
    assert!(!engine.tree().contains(music));
    assert_eq!(engine.tree().len(), 1);
}

#[test]
fn test_only_root_children_receive_ticks() {
    let top = Rc::new(Cell::new(0));
    let nested = Rc::new(Cell::new(0));

    let mut engine = Engine::builder()
        .add_system("top", Ticks { count: Rc::clone(&top) })
        .build()
        .unwrap();
    let top_id = engine.system("top").unwrap().id();
    let node = Node::new("nested").with_object(Ticks {
        count: Rc::clone(&nested),
    });
    engine.tree_mut().spawn_child(top_id, node).unwrap();

    engine.initialize().unwrap();
    for _ in 0..5 {
        engine.update(0.01).unwrap();
    }

    assert_eq!(top.get(), 5);
    assert_eq!(nested.get(), 0);
}

#[test]
fn test_system_mut_reaches_the_object() {
    let count = Rc::new(Cell::new(0));
    let mut engine = Engine::builder()
        .add_system("ticks", Ticks { count: Rc::clone(&count) })
        .build()
        .unwrap();

    let mut system = engine.system_mut("ticks").unwrap();
    system.object_mut().unwrap().update(1.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_root_stays_pinned_through_tree_access() {
    let mut engine = Engine::new();
    let root = engine.root();
    let other = engine.tree_mut().create("Other");

    assert!(engine.tree().is_pinned(root));
    assert!(matches!(
        engine.tree_mut().add_child(other, root),
        Err(SceneError::PinnedRoot(id)) if id == root
    ));
    assert!(engine.root_node().unwrap().is_root());

    // Systems can still be detached and moved around below the root
    let audio = engine.add_system("audio", Ticks { count: Rc::default() }).unwrap();
    assert_eq!(engine.tree_mut().detach(audio), Ok(root));
    engine.tree_mut().add_child(other, audio).unwrap();
    assert!(engine.system_names().unwrap().is_empty());
    assert!(engine.tree().is_consistent());
}
