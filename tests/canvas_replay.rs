use egui::Color32;
use raster_paint::{Canvas, DrawCommand, MemorySurface, PixelPos, raster};

// Helper to create an initialized canvas that publishes into a shared memory surface
fn create_test_canvas(size: [usize; 2]) -> (Canvas, MemorySurface) {
    let surface = MemorySurface::new();
    let mut canvas = Canvas::new(size, Color32::WHITE, Box::new(surface.clone()));
    canvas.compute().unwrap();
    (canvas, surface)
}

fn append_and_sync(canvas: &mut Canvas, batch: Vec<DrawCommand>) {
    canvas.append_commands(batch);
    canvas.log().sync();
}

fn sample_commands() -> Vec<DrawCommand> {
    vec![
        DrawCommand::stroke(PixelPos::new(2, 2), PixelPos::new(30, 12), Color32::RED, 4.0),
        DrawCommand::stroke(PixelPos::new(30, 12), PixelPos::new(30, 30), Color32::RED, 4.0),
        DrawCommand::fill(PixelPos::new(39, 0), Color32::BLUE),
        DrawCommand::stroke(PixelPos::new(0, 39), PixelPos::new(39, 0), Color32::BLACK, 2.0),
        DrawCommand::fill(PixelPos::new(0, 0), Color32::GREEN),
        DrawCommand::stroke(PixelPos::new(20, 20), PixelPos::new(20, 20), Color32::YELLOW, 9.0),
        DrawCommand::fill(PixelPos::new(20, 20), Color32::GRAY),
    ]
}

#[test]
fn test_single_tap_paints_one_disc() {
    let (mut canvas, _surface) = create_test_canvas([100, 100]);
    let center = PixelPos::new(10, 10);
    append_and_sync(&mut canvas, vec![DrawCommand::stroke(center, center, Color32::RED, 4.0)]);

    assert_eq!(canvas.compute().unwrap(), 1);
    assert_eq!(canvas.last_computed_index(), 1);

    let bitmap = canvas.bitmap();
    for y in 0..100 {
        for x in 0..100 {
            let (dx, dy) = (x - 10, y - 10);
            let expected = if dx * dx + dy * dy <= 4 { Color32::RED } else { Color32::WHITE };
            assert_eq!(bitmap.get(PixelPos::new(x, y)), Some(expected));
        }
    }
}

#[test]
fn test_fill_recolors_blank_canvas() {
    let (mut canvas, surface) = create_test_canvas([20, 20]);
    append_and_sync(&mut canvas, vec![DrawCommand::fill(PixelPos::new(5, 5), Color32::BLUE)]);

    canvas.compute().unwrap();
    assert_eq!(canvas.bitmap().count(Color32::BLUE), 400);

    // The published bitmap matches the local one.
    assert_eq!(surface.record().last.as_ref(), Some(canvas.bitmap()));
}

#[test]
fn test_compute_is_idempotent() {
    let (mut canvas, surface) = create_test_canvas([40, 40]);
    append_and_sync(&mut canvas, sample_commands());
    canvas.compute().unwrap();

    let bitmap = canvas.bitmap().clone();
    let index = canvas.last_computed_index();
    let pushes = surface.pushes();

    canvas.compute().unwrap();
    canvas.compute().unwrap();

    assert_eq!(canvas.bitmap(), &bitmap);
    assert_eq!(canvas.last_computed_index(), index);
    assert_eq!(surface.pushes(), pushes);
}

#[test]
fn test_replay_matches_direct_rasterization() {
    let (mut canvas, _surface) = create_test_canvas([40, 40]);
    let commands = sample_commands();
    append_and_sync(&mut canvas, commands.clone());
    canvas.compute().unwrap();

    let mut expected = raster_paint::Bitmap::new([40, 40], Color32::WHITE);
    for command in &commands {
        match command.tool {
            raster_paint::Tool::Stroke => raster::stroke_line(
                &mut expected,
                command.from,
                command.to,
                command.color,
                command.brush_size,
            ),
            raster_paint::Tool::Fill => raster::flood_fill(&mut expected, command.color, command.from),
            raster_paint::Tool::Unknown(_) => {}
        }
    }
    assert_eq!(canvas.bitmap(), &expected);
}

#[test]
fn test_batch_chunking_does_not_change_result() {
    let commands = sample_commands();

    let (mut whole, _surface) = create_test_canvas([40, 40]);
    append_and_sync(&mut whole, commands.clone());
    whole.compute().unwrap();

    for split in 0..=commands.len() {
        let (mut chunked, _surface) = create_test_canvas([40, 40]);
        append_and_sync(&mut chunked, commands[..split].to_vec());
        chunked.compute().unwrap();
        append_and_sync(&mut chunked, commands[split..].to_vec());
        chunked.compute().unwrap();

        assert_eq!(chunked.bitmap(), whole.bitmap(), "split at {split}");
        assert_eq!(chunked.last_computed_index(), commands.len());
    }
}

#[test]
fn test_batches_keep_flush_order() {
    for round in 0..50 {
        let (mut canvas, _surface) = create_test_canvas([10, 10]);
        let first: Vec<_> = (0..5)
            .map(|i| DrawCommand::stroke(PixelPos::new(i, 0), PixelPos::new(i, 0), Color32::RED, 1.0))
            .collect();
        let second: Vec<_> = (0..3)
            .map(|i| DrawCommand::stroke(PixelPos::new(i, 1), PixelPos::new(i, 1), Color32::BLUE, 1.0))
            .collect();

        canvas.append_commands(first.clone());
        canvas.append_commands(second.clone());
        canvas.log().sync();

        let log = canvas.commands();
        assert_eq!(log.len(), 8, "round {round}");
        assert_eq!(&log[..5], first.as_slice());
        assert_eq!(&log[5..], second.as_slice());
    }
}

#[test]
fn test_commands_before_init_are_replayed_after() {
    let surface = MemorySurface::new();
    let mut canvas = Canvas::new([16, 16], Color32::WHITE, Box::new(surface.clone()));
    append_and_sync(&mut canvas, vec![DrawCommand::fill(PixelPos::new(0, 0), Color32::RED)]);

    // Initialization frame
    assert_eq!(canvas.compute().unwrap(), 0);
    assert_eq!(canvas.bitmap().count(Color32::WHITE), 256);

    assert_eq!(canvas.compute().unwrap(), 1);
    assert_eq!(canvas.bitmap().count(Color32::RED), 256);
    assert_eq!(surface.record().commits, 1);
    assert_eq!(surface.record().updates, 1);
}

#[test]
fn test_wide_brush_near_edge_is_clipped() {
    let (mut canvas, _surface) = create_test_canvas([16, 9]);
    append_and_sync(
        &mut canvas,
        vec![DrawCommand::stroke(PixelPos::new(-4, -4), PixelPos::new(20, 12), Color32::BLACK, 30.0)],
    );
    canvas.compute().unwrap();
    assert_eq!(canvas.bitmap().count(Color32::BLACK), 16 * 9);
}
