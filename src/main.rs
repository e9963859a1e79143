// Ember Editor - Main Entry Point
// Headless demo session driving the scene hierarchy controller

use std::path::Path;

use anyhow::Result;
use log::info;

use ember_editor::core::{EditorConfig, EntityId};
use ember_editor::hierarchy::{HierarchyEngine, MemoryClipboard, SceneIndex};
use ember_editor::scene::{MemoryScene, SceneProvider};

const CONFIG_PATH: &str = "editor_config.ron";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::load_or_default(Path::new(CONFIG_PATH));
    info!("starting {} {}", config.editor_name, config.version);

    let mut live = MemoryScene::new();
    let main_scene = live.create_scene("Main Scene");
    let probe = live.create_entity(main_scene, "Editor Probe", None);
    live.set_hidden(probe, true); // engine helpers stay out of the hierarchy

    let mut engine = HierarchyEngine::new(
        Box::new(live),
        Box::new(MemoryClipboard::new()),
        config.clone(),
        main_scene,
    );

    let level = engine.spawn_entity(main_scene, "Level", None);
    let props = engine.spawn_entity(main_scene, "Props", Some(level));
    let supply_crate = engine.spawn_entity(main_scene, "Crate", Some(props));
    let barrel = engine.spawn_entity(main_scene, "Barrel", Some(props));

    engine.rename_entity(supply_crate, "Supply Crate");
    engine.duplicate_entity(props);
    engine.reparent_to_root(main_scene, &[barrel]);

    let rig = engine.add_subscene("Lighting Rig");
    let key_light = engine.spawn_entity(rig, "Key Light", None);

    engine.select(Some(supply_crate));
    engine.set_context_entry(Some(supply_crate));
    engine.cut(supply_crate);
    engine.paste_into_entity(key_light);

    engine.copy(props);
    engine.paste_into_scene(rig);

    engine.set_expanded(level, false);

    for index in engine.indexes() {
        for entry in index.find_by_name("crate") {
            info!("search hit in {}: {}", index.name(), entry.name);
        }
    }

    print_outline(&engine);

    config.save(Path::new(CONFIG_PATH))?;
    Ok(())
}

fn print_outline(engine: &HierarchyEngine) {
    for index in engine.indexes() {
        println!("{} [rev {}]", index.name(), index.revision());
        for &root in index.roots() {
            print_node(index, root, 1);
        }
    }
}

fn print_node(index: &SceneIndex, id: EntityId, depth: usize) {
    let Some(entry) = index.find_entry(id) else {
        return;
    };
    let marker = if entry.visual.is_expanded { "-" } else { "+" };
    println!("{}{} {}", "  ".repeat(depth), marker, entry.name);
    if !entry.visual.is_expanded {
        return;
    }
    for &child in entry.visual.children() {
        print_node(index, child, depth + 1);
    }
}
