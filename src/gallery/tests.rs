use std::cell::Cell;

use image::{GrayImage, Luma};
use ndarray::{Array2, Array3};
use tempfile::tempdir;

use super::{
    CacheBudget, DimensionSource, FileListSource, GalleryDimensions, GalleryError, GalleryEvent,
    GalleryInput, GalleryModel, GalleryOptions, GallerySource, ImageItem, Insets, ItemCache,
    ItemFactory, KeyDeriver, RangeComputer, Result, StackSource, ThumbSize, render_sheet,
};
use crate::model::{Dataset, Metadata, PixelType};

struct FakeSource {
    item_count: usize,
    width: u32,
    height: u32,
    failing_index: Option<usize>,
    created: Cell<usize>,
    range_scans: Cell<usize>,
}

impl FakeSource {
    fn new(item_count: usize) -> Self {
        Self {
            item_count,
            width: 100,
            height: 80,
            failing_index: None,
            created: Cell::new(0),
            range_scans: Cell::new(0),
        }
    }
}

impl DimensionSource for FakeSource {
    fn dimensions(&self) -> Result<GalleryDimensions> {
        if self.width == 0 {
            return Err(GalleryError::DimensionUnavailable("no header".into()));
        }
        Ok(GalleryDimensions {
            item_count: self.item_count,
            width: self.width,
            height: self.height,
        })
    }
}

impl KeyDeriver for FakeSource {
    fn key_for(&self, index: usize, size: ThumbSize) -> Result<String> {
        if index >= self.item_count {
            return Err(GalleryError::InvalidIndex {
                index,
                item_count: self.item_count,
            });
        }
        Ok(format!("fake:{index}@{}x{}", size.width, size.height))
    }
}

impl ItemFactory for FakeSource {
    fn create(&self, index: usize, key: &str, size: ThumbSize) -> Result<ImageItem> {
        self.created.set(self.created.get() + 1);
        if self.failing_index == Some(index) {
            return Err(GalleryError::ItemCreation {
                index,
                reason: "corrupt frame".into(),
            });
        }
        let thumbnail = Array2::from_shape_fn(
            (size.height as usize, size.width as usize),
            |(y, x)| index as f32 + (y + x) as f32 / 10.0,
        );
        Ok(ImageItem::new(index, key, format!("item {index}"), thumbnail))
    }
}

impl RangeComputer for FakeSource {
    fn min_max(&self) -> (f32, f32) {
        self.range_scans.set(self.range_scans.get() + 1);
        (0.0, 100.0)
    }
}

impl GallerySource for FakeSource {
    fn title(&self) -> String {
        "fake".to_string()
    }
}

fn gallery(item_count: usize) -> GalleryModel<FakeSource> {
    GalleryModel::new(FakeSource::new(item_count), 100).expect("gallery")
}

#[test]
fn construction_starts_with_a_single_column() {
    let model = gallery(10);
    assert_eq!(model.item_count(), 10);
    assert_eq!(model.row_count(), 10);
    assert_eq!(model.column_count(), 1);
    assert_eq!(model.zoom(), 100);
    assert_eq!(model.thumb_size(), ThumbSize { width: 100, height: 80 });
    assert!(model.pending_events().is_empty());
    assert_eq!(model.column_name(0), "1");
}

#[test]
fn set_columns_derives_rows() {
    let mut model = gallery(10);
    model.set_columns(3);
    assert_eq!(model.column_count(), 3);
    assert_eq!(model.row_count(), 4);
    assert_eq!(model.take_events(), vec![GalleryEvent::StructureChanged]);
}

#[test]
fn set_rows_then_set_columns_restores_row_invariant() {
    let mut model = gallery(10);
    model.set_rows(3);
    assert_eq!(model.column_count(), 4);
    assert_eq!(model.row_count(), 3);
    model.set_columns(6);
    assert_eq!(model.row_count(), 10usize.div_ceil(6));
    model.set_columns(6);
    assert_eq!(
        model.take_events(),
        vec![GalleryEvent::StructureChanged, GalleryEvent::StructureChanged]
    );
}

#[test]
fn coordinates_round_trip_for_every_item() {
    for cols in 1..=7 {
        let mut model = gallery(17);
        model.set_columns(cols);
        assert!(model.row_count() * model.column_count() >= model.item_count());
        for row in 0..model.row_count() {
            for col in 0..model.column_count() {
                let index = model.coords_to_index(row, col).expect("index fits");
                if index < model.item_count() {
                    assert_eq!(model.index_to_coords(index), (row, col));
                }
            }
        }
    }
}

#[test]
fn zero_rows_or_columns_are_treated_as_one() {
    let mut model = gallery(5);
    model.set_columns(2);
    model.set_columns(0);
    assert_eq!(model.column_count(), 1);
    assert_eq!(model.row_count(), 5);
    model.set_rows(0);
    assert_eq!(model.row_count(), 1);
    assert_eq!(model.column_count(), 5);
}

#[test]
fn repeated_zoom_notifies_once() {
    let mut model = gallery(4);
    model.set_zoom(50);
    model.set_zoom(50);
    assert_eq!(model.take_events(), vec![GalleryEvent::AllCellsChanged]);
    assert_eq!(model.thumb_size(), ThumbSize { width: 50, height: 40 });
    assert!((model.scale() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn zoom_floors_scaled_size() {
    let mut model = gallery(1);
    model.set_zoom(33);
    assert_eq!(model.thumb_size(), ThumbSize { width: 33, height: 26 });
    model.set_zoom(0);
    assert_eq!(model.zoom(), 1);
    assert_eq!(model.thumb_size(), ThumbSize { width: 1, height: 1 });
}

#[test]
fn cell_size_includes_border_and_label() {
    let options = GalleryOptions {
        zoom: 100,
        label_height: 12,
        border: Insets {
            top: 1,
            left: 2,
            bottom: 3,
            right: 4,
        },
        cache: CacheBudget::default(),
    };
    let mut model = GalleryModel::with_options(FakeSource::new(3), options).expect("gallery");
    assert_eq!(model.cell_size().width, 106);
    assert_eq!(model.cell_size().height, 84);
    model.set_show_labels(true);
    assert_eq!(model.cell_size().height, 96);
    model.set_show_labels(true);
    assert_eq!(model.take_events(), vec![GalleryEvent::AllCellsChanged]);
}

#[test]
fn adjust_to_width_tracks_zoom_until_columns_are_fixed() {
    let mut model = gallery(10);
    // cell width is 100 + 2 * 2 border pixels
    model.adjust_to_width(420);
    assert!(model.adjusts_columns());
    assert_eq!(model.column_count(), 4);
    assert_eq!(model.row_count(), 3);

    model.set_zoom(50);
    assert_eq!(model.column_count(), 7);
    assert_eq!(model.row_count(), 2);
    assert_eq!(
        model.take_events(),
        vec![
            GalleryEvent::StructureChanged,
            GalleryEvent::AllCellsChanged,
            GalleryEvent::StructureChanged,
        ]
    );

    model.set_columns(2);
    assert!(!model.adjusts_columns());
    model.set_zoom(25);
    assert_eq!(model.column_count(), 2);
}

#[test]
fn narrow_viewport_keeps_one_column() {
    let mut model = gallery(3);
    model.set_columns(3);
    model.adjust_to_width(10);
    assert_eq!(model.column_count(), 1);
    assert_eq!(model.row_count(), 3);
}

#[test]
fn toggle_item_is_its_own_inverse() {
    let mut model = gallery(10);
    model.set_columns(3);
    model.take_events();
    model.toggle_item(1, 2).expect("toggle");
    assert!(model.is_selected(5));
    model.toggle_item(1, 2).expect("toggle");
    assert!(!model.is_selected(5));
    assert_eq!(model.selected_count(), 0);
    assert_eq!(
        model.take_events(),
        vec![
            GalleryEvent::CellChanged { row: 1, col: 2 },
            GalleryEvent::CellChanged { row: 1, col: 2 },
        ]
    );
}

#[test]
fn toggle_range_covers_row_major_span() {
    let mut model = gallery(10);
    model.set_columns(3);
    model.take_events();
    model.toggle_range(0, 0, 1, 2).expect("range");
    assert_eq!(model.selected_indices(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(model.take_events(), vec![GalleryEvent::AllCellsChanged]);

    // corners given in reverse order toggle the same span back
    model.toggle_range(1, 2, 0, 0).expect("range");
    assert_eq!(model.selected_count(), 0);
}

#[test]
fn toggle_range_stops_at_last_item() {
    let mut model = gallery(10);
    model.set_columns(3);
    model.toggle_range(3, 0, 3, 2).expect("range");
    assert_eq!(model.selected_indices(), vec![9]);
    let error = model.toggle_range(3, 1, 3, 2).expect_err("past the end");
    assert!(matches!(
        error,
        GalleryError::InvalidIndex {
            index: 10,
            item_count: 10
        }
    ));
}

#[test]
fn out_of_range_selection_is_rejected() {
    let mut model = gallery(10);
    model.set_columns(3);
    assert!(model.toggle_item(3, 1).is_err());
    assert!(model.toggle_item(0, 3).is_err());
    assert!(model.goto_item(10).is_err());
    assert_eq!(model.selected_count(), 0);
}

#[test]
fn huge_coordinates_do_not_wrap() {
    let mut model = gallery(10);
    model.set_columns(3);
    let row = usize::MAX / 2;
    assert_eq!(model.coords_to_index(row, 0), None);
    assert!(model.get_value(row, 0).is_none());
    assert!(matches!(
        model.toggle_item(row, 0),
        Err(GalleryError::InvalidIndex { index: usize::MAX, item_count: 10 })
    ));
    assert!(model.toggle_range(row, 0, row, 2).is_err());
    assert_eq!(model.selected_count(), 0);

    model.toggle_range(row, 0, 2, 2).expect("clamped range");
    assert_eq!(model.selected_indices(), vec![8, 9]);
}

#[test]
fn goto_item_replaces_selection() {
    let mut model = gallery(10);
    model.set_columns(4);
    model.toggle_range(0, 0, 0, 3).expect("range");
    model.take_events();
    model.goto_item(6).expect("goto");
    assert_eq!(model.selected_indices(), vec![6]);
    assert_eq!(
        model.take_events(),
        vec![GalleryEvent::CellChanged { row: 1, col: 2 }]
    );
    model.clear_selection();
    assert_eq!(model.selected_count(), 0);
    assert!(model.pending_events().is_empty());
}

#[test]
fn normalization_range_is_computed_once() {
    let mut model = gallery(4);
    model.set_normalized(true);
    model.set_normalized(true);
    assert_eq!(model.source().range_scans.get(), 1);
    model.set_normalized(false);
    model.set_normalized(true);
    assert_eq!(model.source().range_scans.get(), 1);
    assert_eq!(model.normalization_range(), Some((0.0, 100.0)));
    assert_eq!(model.take_events().len(), 3);
}

#[test]
fn normalization_overrides_display_range() {
    let mut model = gallery(4);
    model.set_zoom(10);
    let native = model.get_value(2, 0).expect("item").native_range();
    assert_eq!(native.0, 2.0);

    model.set_normalized(true);
    let item = model.get_value(2, 0).expect("item");
    assert_eq!(item.display_range(), (0.0, 100.0));

    model.set_normalized(false);
    let item = model.get_value(2, 0).expect("item");
    assert_eq!(item.display_range(), native);
}

#[test]
fn lookup_past_last_item_skips_factory() {
    let mut model = gallery(10);
    model.set_columns(3);
    assert!(model.get_value(3, 1).is_none());
    assert!(model.get_value(3, 2).is_none());
    assert!(model.get_value(0, 5).is_none());
    assert_eq!(model.source().created.get(), 0);
    assert!(model.get_value(3, 0).is_some());
    assert_eq!(model.source().created.get(), 1);
}

#[test]
fn cached_items_are_reused_until_zoom_changes() {
    let mut model = gallery(3);
    model.toggle_item(1, 0).expect("toggle");
    model.set_show_labels(true);
    let item = model.get_value(1, 0).expect("item");
    assert!(item.selected);
    assert!(item.show_label);
    assert_eq!(item.label, "item 1");
    model.get_value(1, 0).expect("item");
    assert_eq!(model.source().created.get(), 1);
    assert_eq!(model.cache_stats().hits, 1);

    model.set_zoom(50);
    let item = model.get_value(1, 0).expect("item");
    assert_eq!((item.width(), item.height()), (50, 40));
    assert_eq!(model.source().created.get(), 2);
}

#[test]
fn failed_items_render_empty() {
    let mut source = FakeSource::new(3);
    source.failing_index = Some(1);
    let mut model = GalleryModel::new(source, 100).expect("gallery");
    assert!(model.get_value(1, 0).is_none());
    assert!(model.get_value(2, 0).is_some());
    assert!(model.get_value(1, 0).is_none());
    assert_eq!(model.source().created.get(), 3);
}

#[test]
fn missing_dimensions_fail_construction() {
    let mut source = FakeSource::new(3);
    source.width = 0;
    let error = GalleryModel::new(source, 100).err().expect("must fail");
    assert!(matches!(error, GalleryError::DimensionUnavailable(_)));
}

#[test]
fn cache_capacity_follows_memory_budget() {
    let budget = CacheBudget {
        memory_bytes: 1_000,
        max_pixel_bytes: 4,
    };
    assert_eq!(budget.capacity_for(10, 10), 2);
    assert_eq!(budget.capacity_for(100, 100), 1);

    let options = GalleryOptions {
        cache: CacheBudget {
            memory_bytes: 100 * 80 * 4 * 3,
            max_pixel_bytes: 4,
        },
        ..GalleryOptions::default()
    };
    let mut model = GalleryModel::with_options(FakeSource::new(10), options).expect("gallery");
    assert_eq!(model.cache_capacity(), 3);
    for row in 0..10 {
        model.get_value(row, 0).expect("item");
    }
    assert_eq!(model.cache_len(), 3);
    model.set_cache_budget(CacheBudget {
        memory_bytes: 0,
        max_pixel_bytes: 4,
    });
    assert_eq!(model.cache_capacity(), 1);
    assert_eq!(model.cache_len(), 1);
}

#[test]
fn item_cache_evicts_least_recently_used() {
    let mut cache = ItemCache::new(2);
    cache.put("a".to_string(), 1);
    cache.put("b".to_string(), 2);
    assert_eq!(cache.get("a"), Some(&1));
    cache.put("c".to_string(), 3);
    assert!(cache.contains_key("a"));
    assert!(!cache.contains_key("b"));
    assert!(cache.contains_key("c"));
    assert_eq!(cache.stats().evictions, 1);

    cache.resize(1);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains_key("c"));
    cache.resize(0);
    assert_eq!(cache.capacity(), 1);
}

fn volume(height: usize, width: usize, depth: usize) -> Dataset<f32> {
    let data = Array3::from_shape_fn((height, width, depth), |(y, x, z)| {
        (z * 10) as f32 + (y + x) as f32
    })
    .into_dyn();
    let mut metadata = Metadata::from_shape(&[height, width, depth], PixelType::F32);
    metadata.source = Some("volume.tif".into());
    Dataset::new(data, metadata).expect("volume")
}

#[test]
fn stack_source_serves_scaled_slices() {
    let mut model = GalleryModel::new(StackSource::new(volume(4, 6, 3)), 50).expect("gallery");
    assert_eq!(model.item_count(), 3);
    assert_eq!(model.title(), "volume.tif");
    let item = model.get_value(2, 0).expect("item");
    assert_eq!((item.width(), item.height()), (3, 2));
    assert_eq!(item.key, "volume.tif:2@3x2");
    assert_eq!(item.label, "3");
    assert!(item.native_range().0 >= 20.0);

    model.set_normalized(true);
    assert_eq!(model.normalization_range(), Some((0.0, 28.0)));
    assert!(model.source().key_for(3, model.thumb_size()).is_err());
}

#[test]
fn downscaled_slices_keep_values_outside_unit_range() {
    let mut model = GalleryModel::new(StackSource::new(volume(4, 6, 3)), 50).expect("gallery");
    let item = model.get_value(2, 0).expect("item");
    let (min, max) = item.native_range();
    assert!(min >= 20.0);
    assert!(max <= 28.0 + 1e-4);
    assert!(max - min > 2.0);
}

#[test]
fn scaling_preserves_negative_and_flat_planes() {
    let signed = Array2::from_shape_fn((4, 4), |(y, x)| y as f32 * 100.0 - x as f32 * 50.0);
    let scaled = super::item::scale_plane(&signed, ThumbSize { width: 2, height: 2 }).expect("scaled");
    assert_eq!(scaled.dim(), (2, 2));
    assert!(scaled.iter().all(|&value| (-150.0..=300.0).contains(&value)));
    assert!(scaled.iter().any(|&value| value < 0.0));
    assert!(scaled.iter().any(|&value| value > 1.0));

    let flat = Array2::from_elem((4, 4), 7.5_f32);
    let scaled = super::item::scale_plane(&flat, ThumbSize { width: 3, height: 1 }).expect("scaled");
    assert_eq!(scaled.dim(), (1, 3));
    assert!(scaled.iter().all(|&value| value == 7.5));
}

#[test]
fn file_list_source_reads_each_file() {
    let dir = tempdir().expect("tempdir");
    let first = GrayImage::from_fn(8, 4, |x, _| Luma([(x * 30) as u8]));
    first.save(dir.path().join("a.png")).expect("save");
    let second = GrayImage::from_pixel(16, 8, Luma([200]));
    second.save(dir.path().join("b.png")).expect("save");
    std::fs::write(dir.path().join("c.png"), b"not a png").expect("write");
    std::fs::write(dir.path().join("notes.txt"), b"ignored").expect("write");

    let source = FileListSource::from_directory(dir.path()).expect("source");
    assert_eq!(source.paths().len(), 3);
    let mut model = GalleryModel::new(source, 100).expect("gallery");
    assert_eq!(model.dimensions().width, 8);
    assert_eq!(model.dimensions().height, 4);

    let item = model.get_value(1, 0).expect("second file");
    assert_eq!(item.label, "b.png");
    assert_eq!((item.width(), item.height()), (8, 4));
    assert!(model.get_value(2, 0).is_none());

    model.set_normalized(true);
    let (min, max) = model.normalization_range().expect("range");
    assert_eq!(min, 0.0);
    assert!((max - 210.0 / 255.0).abs() < 1e-3);
}

#[test]
fn empty_file_list_has_no_dimensions() {
    let error = GalleryModel::new(FileListSource::new(Vec::new()), 100)
        .err()
        .expect("must fail");
    assert!(matches!(error, GalleryError::DimensionUnavailable(_)));
}

#[test]
fn sheet_paints_every_item() {
    let mut model = GalleryModel::new(StackSource::new(volume(4, 4, 5)), 100).expect("gallery");
    model.set_columns(2);
    model.set_show_labels(true);
    model.goto_item(3).expect("goto");
    let (image, layout) = render_sheet(&mut model);

    let cell = model.cell_size();
    assert_eq!(image.width(), 2 * cell.width);
    assert_eq!(image.height(), 3 * cell.height);
    assert_eq!(layout.cells.len(), 5);
    assert_eq!(layout.rows, 3);
    let selected = layout
        .cells
        .iter()
        .filter(|cell| cell.selected)
        .map(|cell| (cell.row, cell.col, cell.index))
        .collect::<Vec<_>>();
    assert_eq!(selected, vec![(1, 1, 3)]);
    assert_eq!(image.get_pixel(cell.width, cell.height).0, [255, 170, 0]);
}

#[test]
fn gallery_input_picks_stack_or_file_list() {
    let dir = tempdir().expect("tempdir");
    let stack_path = dir.path().join("stack.tif");
    crate::formats::write_dataset(&stack_path, &volume(4, 6, 3)).expect("write stack");
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).expect("mkdir");
    for name in ["f1.png", "f2.png"] {
        GrayImage::from_pixel(6, 4, Luma([10]))
            .save(frames.join(name))
            .expect("save");
    }

    let stack = GalleryInput::open(std::slice::from_ref(&stack_path)).expect("stack input");
    assert!(matches!(stack, GalleryInput::Stack(_)));
    assert_eq!(stack.dimensions().expect("dims").item_count, 3);

    let listed = GalleryInput::open(&[frames.clone()]).expect("directory input");
    assert!(matches!(listed, GalleryInput::Files(_)));
    assert_eq!(listed.dimensions().expect("dims").item_count, 2);
    let key = listed
        .key_for(1, ThumbSize { width: 2, height: 2 })
        .expect("key");
    assert_eq!(key, format!("{}@2x2", frames.join("f2.png").display()));

    let explicit = GalleryInput::open(&[frames.join("f2.png"), frames.join("f1.png")])
        .expect("file inputs");
    let mut model = GalleryModel::new(explicit, 100).expect("gallery");
    assert_eq!(model.title(), "2 files");
    assert_eq!(model.get_value(0, 0).expect("first").label, "f2.png");

    assert!(GalleryInput::open(&[]).is_err());
}
