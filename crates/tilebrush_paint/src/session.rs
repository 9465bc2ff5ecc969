//! Tool dispatch for one edited tile layer
//!
//! A [`PaintSession`] owns the editing state of a single tile layer: the
//! current tool and stamp, the active brush, and the gesture in progress.
//! Pointer events arrive in layer-space pixels and are routed to the ops for
//! the current tool.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tilebrush_autotile::{self as autotile, BrushLibrary, ResolvedBrush};
use tilebrush_core::{CellRect, Layer, Stamp, Tile, TileField, TilesetGeometry};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::gesture::{EditHistory, Gesture};
use crate::ops;
use crate::settings::PaintSettings;
use crate::stroke::{BrushStroke, StampStroke};
use crate::PaintError;

/// Editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Draw the current stamp
    #[default]
    Draw,
    /// Paint with the active autotile brush
    Brush,
    /// Erase cells and fix up the active brush around them
    BrushErase,
    /// Flood fill with the current stamp
    Fill,
    /// Globally replace the tiles under the stamp
    Replace,
    /// Drag a rectangle and copy it into the current stamp
    Select,
    /// Drag a rectangle and clear it
    Erase,
}

impl Tool {
    /// Name used for history entries
    pub fn description(&self) -> &'static str {
        match self {
            Tool::Draw => "Paint tiles",
            Tool::Brush => "Paint brush",
            Tool::BrushErase => "Erase brush",
            Tool::Fill => "Fill tiles",
            Tool::Replace => "Replace tiles",
            Tool::Select => "Select tiles",
            Tool::Erase => "Erase tiles",
        }
    }

    fn is_rectangle(&self) -> bool {
        matches!(self, Tool::Select | Tool::Erase)
    }
}

/// Brushes and tileset geometry needed to resolve the active brush
#[derive(Debug, Clone, Copy)]
pub struct BrushContext<'a> {
    pub library: &'a BrushLibrary,
    pub geometries: &'a HashMap<Uuid, TilesetGeometry>,
}

impl<'a> BrushContext<'a> {
    pub fn new(library: &'a BrushLibrary, geometries: &'a HashMap<Uuid, TilesetGeometry>) -> Self {
        Self {
            library,
            geometries,
        }
    }
}

/// Editing state of one tile layer
#[derive(Debug, Clone)]
pub struct PaintSession {
    pub tool: Tool,
    pub stamp: Stamp,
    pub brush: Option<Uuid>,
    pub settings: PaintSettings,
    /// Cell size of the layer, used to map pointer pixels to cells
    grid: TilesetGeometry,
    field: Rc<TileField>,
    gesture: Gesture,
    stamp_stroke: StampStroke,
    brush_stroke: BrushStroke,
    selection: Option<CellRect>,
}

impl PaintSession {
    pub fn new(field: TileField, grid: TilesetGeometry) -> Self {
        Self {
            tool: Tool::default(),
            stamp: Stamp::single(None),
            brush: None,
            settings: PaintSettings::default(),
            grid,
            field: Rc::new(field),
            gesture: Gesture::new(),
            stamp_stroke: StampStroke::new(),
            brush_stroke: BrushStroke::new(),
            selection: None,
        }
    }

    /// Start editing a layer. Object layers cannot be painted.
    pub fn for_layer(layer: &Layer, grid: TilesetGeometry) -> Result<Self, PaintError> {
        let field = layer
            .tile_field()
            .ok_or_else(|| PaintError::NotATileLayer(layer.name.clone()))?;
        Ok(Self::new(field.clone(), grid))
    }

    /// Store the current field into `layer`
    pub fn write_back(&self, layer: &mut Layer) -> Result<(), PaintError> {
        let name = layer.name.clone();
        let field = layer
            .tile_field_mut()
            .ok_or(PaintError::NotATileLayer(name))?;
        *field = TileField::clone(&self.field);
        Ok(())
    }

    /// The field as currently shown, including an unfinished gesture
    pub fn field(&self) -> &Rc<TileField> {
        self.gesture.working().unwrap_or(&self.field)
    }

    /// Replace the field, e.g. after undo. Any gesture in progress is dropped.
    pub fn set_field(&mut self, field: Rc<TileField>) {
        self.gesture.abandon();
        self.selection = None;
        self.field = field;
    }

    pub fn is_painting(&self) -> bool {
        self.gesture.is_active()
    }

    /// Rectangle being dragged by Select or Erase
    pub fn selection(&self) -> Option<CellRect> {
        self.selection
    }

    /// Look up the active brush
    pub fn resolve_brush<'a>(&self, ctx: &BrushContext<'a>) -> Result<ResolvedBrush<'a>, PaintError> {
        let id = self.brush.ok_or(PaintError::NoBrushSelected)?;
        Ok(ctx.library.resolve(id, ctx.geometries)?)
    }

    /// Start a gesture. Returns true if the field changed.
    pub fn mouse_down(&mut self, ctx: &BrushContext, px: f32, py: f32) -> bool {
        let cell = self.grid.pixel_to_cell(px, py);
        self.gesture.begin(Rc::clone(&self.field), self.tool.description());
        self.stamp_stroke.reset();
        self.brush_stroke.reset();
        self.selection = None;

        match self.tool {
            Tool::Draw => self.paint_stamp(cell),
            Tool::Brush => match self.resolve_brush(ctx) {
                Ok(brush) => {
                    let pos_in_cell = self.grid.pixel_in_cell(px, py);
                    let cell_size = (self.grid.cell_width as f32, self.grid.cell_height as f32);
                    let edge_policy = self.settings.edge_policy;
                    let stroke = &mut self.brush_stroke;
                    self.gesture.apply(|field| {
                        stroke.begin(field, &brush, edge_policy, cell, pos_in_cell, cell_size)
                    })
                }
                Err(err) => {
                    warn!("brush painting refused: {}; drawing stamp instead", err);
                    self.paint_stamp(cell)
                }
            },
            Tool::BrushErase => self.erase_brush(ctx, cell),
            Tool::Fill => {
                let stamp = &self.stamp;
                self.gesture
                    .apply(|field| ops::flood_fill(field, cell, stamp) > 0)
            }
            Tool::Replace => {
                let stamp = &self.stamp;
                self.gesture
                    .apply(|field| ops::replace(field, stamp, cell) > 0)
            }
            Tool::Select | Tool::Erase => {
                self.selection = Some(CellRect::new(cell.0, cell.1, cell.0, cell.1));
                false
            }
        }
    }

    /// Continue a gesture. Returns true if the field changed.
    pub fn mouse_move(&mut self, ctx: &BrushContext, px: f32, py: f32) -> bool {
        if !self.gesture.is_active() {
            return false;
        }
        let cell = self.grid.pixel_to_cell(px, py);
        if matches!(self.tool, Tool::Brush | Tool::BrushErase) && self.brush_stroke.is_repeat(cell) {
            return false;
        }

        match self.tool {
            Tool::Draw => self.paint_stamp(cell),
            Tool::Brush => match self.resolve_brush(ctx) {
                Ok(brush) => {
                    let edge_policy = self.settings.edge_policy;
                    let stroke = &mut self.brush_stroke;
                    self.gesture
                        .apply(|field| stroke.extend(field, &brush, edge_policy, cell))
                }
                Err(err) => {
                    warn!("brush painting refused: {}; drawing stamp instead", err);
                    self.paint_stamp(cell)
                }
            },
            Tool::BrushErase => self.erase_brush(ctx, cell),
            Tool::Fill | Tool::Replace => false,
            Tool::Select | Tool::Erase => {
                if let Some(rect) = &mut self.selection {
                    rect.x2 = cell.0;
                    rect.y2 = cell.1;
                }
                false
            }
        }
    }

    /// Finish the gesture and hand it to `history`.
    /// Returns true if the field changed.
    pub fn mouse_up<H>(&mut self, history: &mut H) -> bool
    where
        H: EditHistory + ?Sized,
    {
        if !self.gesture.is_active() {
            return false;
        }

        if self.tool.is_rectangle() {
            if let Some(rect) = self.selection.take() {
                match self.tool {
                    Tool::Select => {
                        let copied = ops::copy_region(self.field(), rect);
                        self.stamp = copied;
                        debug!(
                            "copied {}x{} selection into the current stamp",
                            self.stamp.width(),
                            self.stamp.height()
                        );
                    }
                    _ => {
                        self.gesture
                            .apply(|field| ops::erase_region(field, rect) > 0);
                    }
                }
            }
        }

        let Some(result) = self.gesture.end(history) else {
            return false;
        };
        let changed = !Rc::ptr_eq(&result, &self.field);
        self.field = result;
        changed
    }

    /// Cells the active brush would change if clicked at a pixel, without
    /// painting. Empty when no brush is usable.
    pub fn brush_preview(&self, ctx: &BrushContext, px: f32, py: f32) -> Vec<((i32, i32), Option<Tile>)> {
        let Ok(brush) = self.resolve_brush(ctx) else {
            return Vec::new();
        };
        let (x, y) = self.grid.pixel_to_cell(px, py);
        let (cx, cy) = self.grid.pixel_in_cell(px, py);
        let kind = autotile::fill_type_for_subposition(
            cx,
            cy,
            self.grid.cell_width as f32,
            self.grid.cell_height as f32,
            self.brush_stroke.cells_visited() > 0 && self.gesture.is_active(),
        );
        autotile::preview_place(self.field(), x, y, &brush, self.settings.edge_policy, kind)
    }

    fn paint_stamp(&mut self, cell: (i32, i32)) -> bool {
        let suppress = self.settings.suppress_stamp_jitter;
        if self.stamp_stroke.skips(&self.stamp, cell, suppress) {
            return false;
        }
        let stamp = &self.stamp;
        let stroke = &mut self.stamp_stroke;
        self.gesture
            .apply(|field| stroke.paint(field, stamp, cell, suppress))
    }

    fn erase_brush(&mut self, ctx: &BrushContext, cell: (i32, i32)) -> bool {
        match self.resolve_brush(ctx) {
            Ok(brush) => {
                let edge_policy = self.settings.edge_policy;
                let stroke = &mut self.brush_stroke;
                self.gesture
                    .apply(|field| stroke.erase(field, &brush, edge_policy, cell))
            }
            Err(err) => {
                warn!("brush erase refused: {}; clearing cell only", err);
                self.gesture.apply(|field| field.set(cell.0, cell.1, None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilebrush_autotile::{BrushCatalog, ShapeKind, ShapeMask};

    const SOLID: u32 = 0;
    const CORNER_UL: u32 = 1;

    #[derive(Default)]
    struct Commits(Vec<String>);

    impl EditHistory for Commits {
        fn commit(&mut self, _before: Rc<TileField>, _after: Rc<TileField>, description: &str) {
            self.0.push(description.to_string());
        }
    }

    struct Fixture {
        library: BrushLibrary,
        geometries: HashMap<Uuid, TilesetGeometry>,
        tileset_id: Uuid,
        brush_id: Uuid,
    }

    impl Fixture {
        fn new() -> Self {
            let tileset_id = Uuid::new_v4();
            let mut catalog = BrushCatalog::new("Ground".to_string(), tileset_id);
            catalog.add_entry(SOLID, ShapeMask::filled(ShapeKind::Full));
            catalog.add_entry(CORNER_UL, ShapeMask::isolated(ShapeKind::DiagonalUL));
            catalog.set_default(SOLID);
            let brush_id = catalog.id;

            let mut library = BrushLibrary::new();
            library.add(catalog);
            let mut geometries = HashMap::new();
            geometries.insert(tileset_id, TilesetGeometry::new(16, 16, 64, 64));

            Self {
                library,
                geometries,
                tileset_id,
                brush_id,
            }
        }

        fn ctx(&self) -> BrushContext<'_> {
            BrushContext::new(&self.library, &self.geometries)
        }
    }

    fn session() -> PaintSession {
        PaintSession::new(TileField::new(4, 4), TilesetGeometry::new(16, 16, 64, 64))
    }

    fn index_at(session: &PaintSession, x: i32, y: i32) -> Option<u32> {
        session.field().get(x, y).map(|t| t.tile_index)
    }

    #[test]
    fn test_draw_commits_one_edit() {
        let fixture = Fixture::new();
        let mut session = session();
        let mut history = Commits::default();
        session.stamp = Stamp::single(Some(Tile::new(fixture.tileset_id, 3)));

        assert!(session.mouse_down(&fixture.ctx(), 8.0, 8.0));
        assert!(session.mouse_move(&fixture.ctx(), 24.0, 8.0));
        assert!(!session.mouse_move(&fixture.ctx(), 30.0, 12.0));
        assert_eq!(index_at(&session, 1, 0), Some(3));
        assert!(session.mouse_up(&mut history));

        assert_eq!(history.0, vec!["Paint tiles".to_string()]);
        assert_eq!(session.field().tile_count(), 2);
    }

    #[test]
    fn test_noop_gesture_does_not_commit() {
        let fixture = Fixture::new();
        let mut session = session();
        let mut history = Commits::default();

        // The default stamp is a single empty cell
        session.mouse_down(&fixture.ctx(), 8.0, 8.0);
        assert!(!session.mouse_up(&mut history));
        assert!(history.0.is_empty());
    }

    #[test]
    fn test_brush_click_then_drag() {
        let fixture = Fixture::new();
        let mut session = session();
        let mut history = Commits::default();
        session.tool = Tool::Brush;
        session.brush = Some(fixture.brush_id);

        // Upper-left ninth of cell (1, 1)
        session.mouse_down(&fixture.ctx(), 17.0, 17.0);
        assert_eq!(index_at(&session, 1, 1), Some(CORNER_UL));

        // Moving within the same cell is not a drag
        assert!(!session.mouse_move(&fixture.ctx(), 30.0, 20.0));
        assert_eq!(index_at(&session, 1, 1), Some(CORNER_UL));

        session.mouse_move(&fixture.ctx(), 40.0, 24.0);
        session.mouse_up(&mut history);
        assert_eq!(index_at(&session, 1, 1), Some(SOLID));
        assert_eq!(index_at(&session, 2, 1), Some(SOLID));
        assert_eq!(history.0.len(), 1);
    }

    #[test]
    fn test_brush_without_selection_draws_stamp() {
        let fixture = Fixture::new();
        let mut session = session();
        session.tool = Tool::Brush;
        session.stamp = Stamp::single(Some(Tile::new(fixture.tileset_id, 9)));

        assert!(matches!(
            session.resolve_brush(&fixture.ctx()),
            Err(PaintError::NoBrushSelected)
        ));
        assert!(session.mouse_down(&fixture.ctx(), 8.0, 8.0));
        assert_eq!(index_at(&session, 0, 0), Some(9));
    }

    #[test]
    fn test_unknown_brush_is_refused() {
        let fixture = Fixture::new();
        let mut session = session();
        session.brush = Some(Uuid::new_v4());

        assert!(matches!(
            session.resolve_brush(&fixture.ctx()),
            Err(PaintError::Brush(autotile::BrushError::UnknownBrush(_)))
        ));
        assert!(session.brush_preview(&fixture.ctx(), 8.0, 8.0).is_empty());
    }

    #[test]
    fn test_select_copies_into_stamp() {
        let fixture = Fixture::new();
        let mut session = session();
        let mut history = Commits::default();
        let mut field = TileField::new(4, 4);
        field.set(2, 2, Some(Tile::new(fixture.tileset_id, 5)));
        session.set_field(Rc::new(field));

        session.tool = Tool::Select;
        session.mouse_down(&fixture.ctx(), 50.0, 50.0);
        session.mouse_move(&fixture.ctx(), 20.0, 20.0);
        assert_eq!(session.selection(), Some(CellRect::new(3, 3, 1, 1)));
        assert!(!session.mouse_up(&mut history));

        assert!(history.0.is_empty());
        assert_eq!((session.stamp.width(), session.stamp.height()), (3, 3));
        assert_eq!(
            session.stamp.field().get(1, 1),
            Some(Tile::new(fixture.tileset_id, 5))
        );
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_erase_rectangle() {
        let fixture = Fixture::new();
        let mut session = session();
        let mut history = Commits::default();
        session.stamp = Stamp::single(Some(Tile::new(fixture.tileset_id, 1)));
        session.tool = Tool::Fill;
        session.mouse_down(&fixture.ctx(), 0.0, 0.0);
        session.mouse_up(&mut history);
        assert_eq!(session.field().tile_count(), 16);

        session.tool = Tool::Erase;
        session.mouse_down(&fixture.ctx(), 0.0, 0.0);
        session.mouse_move(&fixture.ctx(), 20.0, 20.0);
        assert!(session.mouse_up(&mut history));

        assert_eq!(session.field().tile_count(), 12);
        assert_eq!(history.0, vec!["Fill tiles".to_string(), "Erase tiles".to_string()]);
    }

    #[test]
    fn test_fill_with_same_tile_does_not_commit() {
        let fixture = Fixture::new();
        let mut session = session();
        let mut history = Commits::default();
        session.tool = Tool::Fill;

        // Filling an empty field with the empty stamp changes nothing
        assert!(!session.mouse_down(&fixture.ctx(), 8.0, 8.0));
        assert!(!session.mouse_up(&mut history));
        assert!(history.0.is_empty());
    }

    #[test]
    fn test_layer_round_trip() {
        let fixture = Fixture::new();
        let grid = TilesetGeometry::new(16, 16, 64, 64);
        let mut layer = Layer::new_tile_layer("Ground".to_string(), 4, 4);
        let mut session = PaintSession::for_layer(&layer, grid).unwrap();
        let mut history = Commits::default();

        session.stamp = Stamp::single(Some(Tile::new(fixture.tileset_id, 2)));
        session.mouse_down(&fixture.ctx(), 40.0, 40.0);
        session.mouse_up(&mut history);
        session.write_back(&mut layer).unwrap();

        assert_eq!(
            layer.tile_field().and_then(|f| f.get(2, 2)),
            Some(Tile::new(fixture.tileset_id, 2))
        );

        let objects = Layer::new_object_layer("Spawns".to_string());
        assert!(matches!(
            PaintSession::for_layer(&objects, grid),
            Err(PaintError::NotATileLayer(name)) if name == "Spawns"
        ));
    }

    #[test]
    fn test_brush_preview_does_not_paint() {
        let fixture = Fixture::new();
        let mut session = session();
        session.brush = Some(fixture.brush_id);

        let preview = session.brush_preview(&fixture.ctx(), 24.0, 24.0);
        assert_eq!(
            preview,
            vec![((1, 1), Some(Tile::new(fixture.tileset_id, SOLID)))]
        );
        assert_eq!(session.field().tile_count(), 0);
    }
}
