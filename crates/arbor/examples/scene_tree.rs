//! Builds an engine with a few systems, ticks it and prints the resulting tree.
//!
//! Run with `RUST_LOG=debug cargo run --example scene_tree` to see every
//! structural change.

use arbor::prelude::*;

struct Clock {
    elapsed: f64,
}

impl Object for Clock {
    fn update(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    fn shutdown(&mut self) {
        tracing::info!("Clock ran for {:.3}s", self.elapsed);
    }
}

struct Physics {
    fixed_steps: u32,
}

impl Object for Physics {
    fn initialize(&mut self) {
        tracing::info!("Physics online");
    }

    fn fixed_update(&mut self, _dt: f64) {
        self.fixed_steps += 1;
    }

    fn shutdown(&mut self) {
        tracing::info!("Physics ran {} fixed steps", self.fixed_steps);
    }
}

fn print_subtree(node: NodeRef<'_>, depth: usize) {
    println!("{:indent$}{} ({})", "", node.name(), node.id(), indent = depth * 2);
    for child in &node {
        print_subtree(child, depth + 1);
    }
}

fn main() -> Result<(), EngineError> {
    let mut engine = Engine::builder()
        .with_config(Config::default().with_name("Demo"))
        .with_logging()
        .add_system("clock", Clock { elapsed: 0.0 })
        .add_system("physics", Physics { fixed_steps: 0 })
        .build()?;

    // Systems are ordinary nodes and can carry their own children
    let physics = engine.system("physics")?.id();
    for body in ["ground", "player", "crate"] {
        engine.tree_mut().spawn_child(physics, Node::new(body))?;
    }

    engine.initialize()?;
    for _ in 0..3 {
        engine.fixed_update(1.0 / 50.0)?;
        engine.update(1.0 / 60.0)?;
    }

    print_subtree(engine.root_node()?, 0);

    match engine.system("renderer") {
        Ok(_) => println!("renderer registered"),
        Err(err) => println!("lookup failed: {err}"),
    }

    engine.stop();
    Ok(())
}
