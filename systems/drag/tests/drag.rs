use hearthstead_core::{
    grid_to_view, Command, Event, GridCoord, TileCategory, TileColor, TileDefinition, TileInstance,
    ViewPoint,
};
use hearthstead_system_drag::{DragController, DropOutcome};
use hearthstead_world::{apply, query, SessionConfig, World};

fn definitions() -> Vec<TileDefinition> {
    vec![
        TileDefinition::new(
            "bedroom",
            "Bedroom",
            TileColor::from_rgb(0xe3, 0xd5, 0xca),
            TileCategory::Indoor,
            2,
        ),
        TileDefinition::new(
            "flower_field",
            "Flowers",
            TileColor::from_rgb(0xff, 0xb5, 0xa7),
            TileCategory::Outdoor,
            3,
        ),
    ]
}

fn new_world() -> World {
    World::new(SessionConfig::new(definitions(), 21))
}

fn first_hand_tile(world: &World) -> TileInstance {
    query::hand_view(world)
        .iter()
        .next()
        .cloned()
        .expect("hand should hold at least one tile")
}

fn pointer_over(world: &World, cell: GridCoord) -> ViewPoint {
    grid_to_view(cell, query::camera(world), query::tile_length(world))
}

fn sizes(world: &World) -> (usize, usize, usize) {
    (
        query::placed_count(world),
        query::hand_view(world).len(),
        query::deck_remaining(world),
    )
}

#[test]
fn pick_move_drop_commits_through_the_world() {
    let mut world = new_world();
    let mut controller = DragController::new();
    let dragged = first_hand_tile(&world);
    let target = GridCoord::new(1, 0);

    controller.on_pick_up(dragged.clone());
    controller.on_move(
        pointer_over(&world, target),
        query::camera(&world),
        query::tile_length(&world),
    );

    let preview = controller
        .ghost_preview(|cell| query::is_valid_placement(&world, cell))
        .expect("hovering drag exposes a ghost preview");
    assert_eq!(preview.cell, target);
    assert!(preview.placeable);

    let mut commands = Vec::new();
    let outcome = controller.on_drop(
        |cell| query::is_valid_placement(&world, cell),
        &mut commands,
    );
    assert_eq!(outcome, DropOutcome::Committed { cell: target });
    assert_eq!(
        commands,
        vec![Command::PlaceTile {
            instance: dragged.id,
            cell: target,
        }]
    );

    let mut events = Vec::new();
    for command in commands {
        apply(&mut world, command, &mut events);
    }

    assert!(events.contains(&Event::TilePlaced {
        instance: dragged.id,
        cell: target,
    }));
    assert_eq!(sizes(&world), (2, 3, 1));
    assert!(query::is_occupied(&world, target));
}

#[test]
fn drop_over_invalid_cell_cancels_without_effects() {
    let mut world = new_world();
    let mut controller = DragController::new();
    let before = sizes(&world);

    controller.on_pick_up(first_hand_tile(&world));
    controller.on_move(
        pointer_over(&world, GridCoord::new(6, 6)),
        query::camera(&world),
        query::tile_length(&world),
    );

    let mut commands = Vec::new();
    let outcome = controller.on_drop(
        |cell| query::is_valid_placement(&world, cell),
        &mut commands,
    );

    assert_eq!(outcome, DropOutcome::Cancelled);
    assert!(commands.is_empty(), "cancelled drops emit no commands");
    assert_eq!(sizes(&world), before);
    assert!(!controller.is_dragging());
}

#[test]
fn cancel_gesture_leaves_session_untouched() {
    let mut world = new_world();
    let mut controller = DragController::new();
    let before = sizes(&world);

    controller.on_pick_up(first_hand_tile(&world));
    controller.on_move(
        pointer_over(&world, GridCoord::new(0, 1)),
        query::camera(&world),
        query::tile_length(&world),
    );
    controller.on_cancel();

    assert!(!controller.is_dragging());
    assert_eq!(sizes(&world), before);

    // The tile never left the hand, so a fresh drag can pick it up again.
    let mut commands = Vec::new();
    controller.on_pick_up(first_hand_tile(&world));
    controller.on_move(
        pointer_over(&world, GridCoord::new(0, 1)),
        query::camera(&world),
        query::tile_length(&world),
    );
    let outcome = controller.on_drop(
        |cell| query::is_valid_placement(&world, cell),
        &mut commands,
    );
    assert_eq!(
        outcome,
        DropOutcome::Committed {
            cell: GridCoord::new(0, 1),
        }
    );
}

#[test]
fn second_pick_up_keeps_the_original_payload() {
    let world = new_world();
    let mut controller = DragController::new();
    let hand = query::hand_view(&world);
    let first = hand.get(0).cloned().expect("first tray tile");
    let second = hand.get(1).cloned().expect("second tray tile");

    controller.on_pick_up(first.clone());
    controller.on_pick_up(second);

    assert_eq!(controller.dragged_tile(), Some(&first));
}

#[test]
fn stale_move_after_drop_is_ignored() {
    let mut world = new_world();
    let mut controller = DragController::new();

    controller.on_pick_up(first_hand_tile(&world));
    controller.on_move(
        pointer_over(&world, GridCoord::new(1, 0)),
        query::camera(&world),
        query::tile_length(&world),
    );

    let mut commands = Vec::new();
    let outcome = controller.on_drop(
        |cell| query::is_valid_placement(&world, cell),
        &mut commands,
    );
    assert_eq!(
        outcome,
        DropOutcome::Committed {
            cell: GridCoord::new(1, 0),
        }
    );

    // Duplicate tail events from the input layer arrive after resolution.
    controller.on_move(
        pointer_over(&world, GridCoord::new(2, 0)),
        query::camera(&world),
        query::tile_length(&world),
    );
    assert!(controller
        .ghost_preview(|cell| query::is_valid_placement(&world, cell))
        .is_none());

    let mut late_commands = Vec::new();
    assert_eq!(
        controller.on_drop(
            |cell| query::is_valid_placement(&world, cell),
            &mut late_commands,
        ),
        DropOutcome::Ignored
    );
    assert!(late_commands.is_empty());

    let mut events = Vec::new();
    for command in commands {
        apply(&mut world, command, &mut events);
    }
    assert_eq!(sizes(&world), (2, 3, 1));
}

#[test]
fn hover_over_occupied_cell_previews_as_unplaceable() {
    let world = new_world();
    let mut controller = DragController::new();

    controller.on_pick_up(first_hand_tile(&world));
    controller.on_move(
        pointer_over(&world, GridCoord::ORIGIN),
        query::camera(&world),
        query::tile_length(&world),
    );

    let preview = controller
        .ghost_preview(|cell| query::is_valid_placement(&world, cell))
        .expect("hovering drag exposes a ghost preview");
    assert!(!preview.placeable, "the Hearth cell is occupied");
}
