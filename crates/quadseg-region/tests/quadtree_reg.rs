//! Quadtree decomposition regression test
//!
//! Builds trees over synthetic images and checks the structural
//! properties of the decomposition:
//!
//! 1. Corner patch images split exactly down to the patch (gray and RGB)
//! 2. Leaf rectangles tile the image; the mask agrees with the leaves
//! 3. Depths, parity tags and child rectangles follow the split rule
//! 4. Leaf ids follow pre-order
//! 5. Thin images produce zero-area nodes that are never finalized
//! 6. The statistic averages standard deviations over four channel slots
//! 7. Invalid options and converter/depth mismatches are rejected
//!
//! Run with:
//! ```
//! cargo test -p quadseg-region --test quadtree_reg
//! ```

use quadseg_core::{Box, Pix, PixelDepth};
use quadseg_region::{
    HomogeneityEvaluator, IdentityConverter, LabConverter, NodeId, OUT_OF_BOUNDS, QuadTree,
    QuadTreeOptions, RegionError, RegionResult, StdDevEvaluator, split_rect,
};
use quadseg_test::RegParams;

/// 8x8 gray image, 0 everywhere except a 2x2 patch of 200 at the origin.
fn create_gray_corner_patch() -> Pix {
    let mut pm = Pix::new(8, 8, PixelDepth::Bit8).unwrap().to_mut();
    for y in 0..2 {
        for x in 0..2 {
            pm.set_pixel(x, y, 200).unwrap();
        }
    }
    pm.into()
}

/// 8x8 white RGB image with a red 2x2 patch at the origin.
fn create_rgb_corner_patch() -> Pix {
    let mut pm = Pix::new(8, 8, PixelDepth::Bit32).unwrap().to_mut();
    for y in 0..8 {
        for x in 0..8 {
            if x < 2 && y < 2 {
                pm.set_rgb(x, y, 255, 0, 0).unwrap();
            } else {
                pm.set_rgb(x, y, 255, 255, 255).unwrap();
            }
        }
    }
    pm.into()
}

/// Gray image with spatial variation at several scales.
fn create_test_grayscale_image(width: u32, height: u32) -> Pix {
    let mut pm = Pix::new(width, height, PixelDepth::Bit8).unwrap().to_mut();
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 / width as f32;
            let fy = y as f32 / height as f32;
            let val = (128.0
                + 60.0 * (fx * std::f32::consts::TAU).sin()
                + 40.0 * (fy * 2.0 * std::f32::consts::TAU).cos()
                + 20.0 * ((fx + fy) * 9.42).sin()) as u32;
            pm.set_pixel(x, y, val.min(255)).unwrap();
        }
    }
    pm.into()
}

fn build_gradient_tree() -> QuadTree {
    let pix = create_test_grayscale_image(64, 64);
    let options = QuadTreeOptions::new()
        .with_min_block_size(2)
        .with_min_std_dev(10.0);
    QuadTree::new(&pix, &options).expect("build gradient tree")
}

#[test]
fn quadtree_corner_patch() {
    let mut rp = RegParams::new("quadtree_corner");
    let options = QuadTreeOptions::new()
        .with_min_block_size(1)
        .with_min_std_dev(10.0);

    // --- Gray: measured as is ---
    let tree = QuadTree::new(&create_gray_corner_patch(), &options).expect("gray tree");
    rp.compare_values(7.0, tree.leaf_count() as f64, 0.0);
    rp.compare_values(9.0, tree.node_count() as f64, 0.0);
    rp.compare_values(2.0, tree.max_depth() as f64, 0.0);

    // Leaves 0-3 are the 2x2 blocks of the top-left quadrant
    let patch = tree.leaf(0).unwrap();
    rp.check(patch.rect() == Box::new_unchecked(0, 0, 2, 2), "patch leaf rect");
    rp.compare_values(2.0, patch.depth() as f64, 0.0);
    rp.compare_values(200.0, patch.average().unwrap()[0] as f64, 1e-4);
    for id in 1..4 {
        let leaf = tree.leaf(id).unwrap();
        rp.compare_values(2.0, leaf.depth() as f64, 0.0);
        rp.compare_values(0.0, leaf.average().unwrap()[0] as f64, 1e-4);
    }
    for id in 4..7 {
        let leaf = tree.leaf(id).unwrap();
        rp.compare_values(1.0, leaf.depth() as f64, 0.0);
        rp.compare_values(16.0, leaf.rect().area() as f64, 0.0);
    }

    // --- RGB: measured in L*a*b* ---
    let tree = QuadTree::new(&create_rgb_corner_patch(), &options).expect("rgb tree");
    rp.compare_values(7.0, tree.leaf_count() as f64, 0.0);
    rp.compare_values(2.0, tree.max_depth() as f64, 0.0);
    rp.compare_values(32.0, tree.image().depth().bits() as f64, 0.0);
    // White: L = 100 encodes to 255, a and b near 128
    let white = tree.leaf(6).unwrap().average().unwrap();
    rp.compare_values(255.0, white[0] as f64, 1.5);
    rp.compare_values(128.0, white[1] as f64, 1.5);
    rp.compare_values(128.0, white[2] as f64, 1.5);
    // Red has a strongly positive a*
    let red = tree.leaf(0).unwrap().average().unwrap();
    rp.check(red[1] > 180.0, "red leaf a* encodes well above 128");

    // Raising the threshold keeps the image whole
    let strict = options.with_min_std_dev(500.0);
    let tree = QuadTree::new(&create_gray_corner_patch(), &strict).expect("strict tree");
    rp.compare_values(1.0, tree.leaf_count() as f64, 0.0);
    rp.compare_values(0.0, tree.max_depth() as f64, 0.0);

    assert!(rp.cleanup(), "quadtree corner patch test failed");
}

#[test]
fn quadtree_partition_and_mask() {
    let mut rp = RegParams::new("quadtree_partition");
    let tree = build_gradient_tree();
    let (w, h) = (64, 64);
    eprintln!(
        "gradient tree: {} nodes, {} leaves, max depth {}",
        tree.node_count(),
        tree.leaf_count(),
        tree.max_depth()
    );
    rp.check(tree.leaf_count() > 4, "gradient image splits below the quadrants");

    // Leaf areas add up to the image and no two leaves overlap
    let total: i64 = tree.leaf_nodes().map(|n| n.rect().area()).sum();
    rp.compare_values((w * h) as f64, total as f64, 0.0);
    let rects: Vec<Box> = tree.leaf_nodes().map(|n| n.rect()).collect();
    let mut overlapping = 0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if a.overlaps(b) {
                overlapping += 1;
            }
        }
    }
    rp.compare_values(0.0, overlapping as f64, 0.0);

    // Every pixel maps to the leaf that contains it
    let mut mismatches = 0;
    for y in 0..h {
        for x in 0..w {
            let id = tree.get_neighbour_block(x, y);
            let ok = id >= 0
                && tree
                    .leaf(id as u32)
                    .is_some_and(|leaf| leaf.rect().contains_point(x, y));
            if !ok {
                mismatches += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);

    // leaf_at agrees with the mask
    let leaf = tree.leaf_at(40, 17).unwrap();
    rp.compare_values(
        tree.mask().get(40, 17).unwrap() as f64,
        leaf.leaf_id().unwrap() as f64,
        0.0,
    );
    rp.check(tree.leaf_at(64, 0).is_none(), "leaf_at outside the image");

    // Out-of-bounds probes
    rp.compare_values(OUT_OF_BOUNDS as f64, tree.get_neighbour_block(-1, 0) as f64, 0.0);
    rp.compare_values(OUT_OF_BOUNDS as f64, tree.get_neighbour_block(w, 0) as f64, 0.0);
    rp.compare_values(OUT_OF_BOUNDS as f64, tree.get_neighbour_block(0, h) as f64, 0.0);
    rp.compare_values(OUT_OF_BOUNDS as f64, tree.get_neighbour_block(0, -1) as f64, 0.0);

    assert!(rp.cleanup(), "quadtree partition test failed");
}

#[test]
fn quadtree_structure() {
    let mut rp = RegParams::new("quadtree_structure");
    let tree = build_gradient_tree();

    rp.compare_values(0.0, tree.root().depth() as f64, 0.0);
    rp.compare_values(0.0, tree.root().parity() as f64, 0.0);
    rp.check(tree.root().rect() == tree.image().bounds(), "root covers image");
    rp.check(tree.root().parent().is_none(), "root has no parent");

    let mut deepest = 0;
    for node in tree.nodes() {
        match node.children() {
            Some(children) => {
                rp.check(node.leaf_id().is_none(), "internal node has no leaf id");
                let expected = split_rect(&node.rect());
                let rects: Vec<Box> = children.iter().map(|&c| tree.node(c).rect()).collect();
                rp.compare_slices(&expected, &rects);
                let depths: Vec<u32> = children.iter().map(|&c| tree.node(c).depth()).collect();
                rp.compare_slices(&[node.depth() + 1; 4], &depths);
                let parities: Vec<u8> = children.iter().map(|&c| tree.node(c).parity()).collect();
                rp.compare_slices(&[0, 1, 1, 0], &parities);
                for &c in &children {
                    rp.check(tree.node(c).parent() == Some(node.id()), "child links to parent");
                }
            }
            None => {
                rp.check(node.leaf_id().is_some(), "leaf has a leaf id");
                rp.check(node.average().is_some(), "leaf has an average");
                deepest = deepest.max(node.depth());
            }
        }
    }
    rp.compare_values(deepest as f64, tree.max_depth() as f64, 0.0);

    // Node ids are arena positions
    for (i, node) in tree.nodes().iter().enumerate() {
        rp.compare_values(i as f64, node.id().index() as f64, 0.0);
    }

    // Leaf ids follow a top-left, top-right, bottom-left, bottom-right
    // pre-order walk
    let preorder = tree.node_children(NodeId::ROOT);
    rp.compare_slices(tree.leaves(), &preorder);
    for (i, leaf) in tree.leaf_nodes().enumerate() {
        rp.compare_values(i as f64, leaf.leaf_id().unwrap() as f64, 0.0);
    }

    // The same input always gives the same tree
    let again = build_gradient_tree();
    rp.compare_slices(tree.mask().data(), again.mask().data());
    rp.compare_values(tree.node_count() as f64, again.node_count() as f64, 0.0);

    assert!(rp.cleanup(), "quadtree structure test failed");
}

#[test]
fn quadtree_zero_area_nodes() {
    let mut rp = RegParams::new("quadtree_zero_area");

    // 1x4 column of distinct values: every split leaves an empty left half
    let mut pm = Pix::new(1, 4, PixelDepth::Bit8).unwrap().to_mut();
    for y in 0..4 {
        pm.set_pixel(0, y, y * 50).unwrap();
    }
    let pix: Pix = pm.into();
    let options = QuadTreeOptions::new()
        .with_min_block_size(0)
        .with_min_std_dev(0.5);
    let tree = QuadTree::new(&pix, &options).expect("thin tree");

    rp.compare_values(4.0, tree.leaf_count() as f64, 0.0);
    rp.compare_values(13.0, tree.node_count() as f64, 0.0);
    rp.compare_values(2.0, tree.max_depth() as f64, 0.0);
    for y in 0..4 {
        rp.compare_values(y as f64, tree.get_neighbour_block(0, y) as f64, 0.0);
    }

    let empty: Vec<_> = tree.nodes().iter().filter(|n| n.rect().is_empty()).collect();
    rp.compare_values(6.0, empty.len() as f64, 0.0);
    for node in empty {
        rp.check(node.is_leaf(), "zero-area node is childless");
        rp.check(node.leaf_id().is_none(), "zero-area node is not finalized");
        rp.check(node.average().is_none(), "zero-area node has no average");
    }

    // Collectors still report them
    let all = tree.node_children(NodeId::ROOT);
    rp.compare_values(10.0, all.len() as f64, 0.0);

    assert!(rp.cleanup(), "quadtree zero-area test failed");
}

#[test]
fn quadtree_custom_collaborators() {
    let mut rp = RegParams::new("quadtree_collaborators");
    let pix = Pix::new(16, 16, PixelDepth::Bit8).unwrap();
    let options = QuadTreeOptions::new()
        .with_min_block_size(4)
        .with_min_std_dev(1.0);

    // Always split: stops at the block size floor
    let always = |_: &Pix, _: &Box| 100.0f32;
    let tree = QuadTree::with_collaborators(&pix, &options, &IdentityConverter, &always)
        .expect("always-split tree");
    rp.compare_values(16.0, tree.leaf_count() as f64, 0.0);
    rp.compare_values(2.0, tree.max_depth() as f64, 0.0);

    // A converter may not change the image size
    let shrink = |_: &Pix| -> RegionResult<Pix> { Ok(Pix::new(8, 8, PixelDepth::Bit8)?) };
    let result = QuadTree::with_collaborators(&pix, &options, &shrink, &StdDevEvaluator);
    rp.check(
        matches!(result, Err(RegionError::InvalidParameters(_))),
        "size-changing converter rejected",
    );

    assert!(rp.cleanup(), "quadtree collaborators test failed");
}

#[test]
fn quadtree_four_slot_statistic() {
    let mut rp = RegParams::new("quadtree_four_slot");

    // Red alternates 0/60 (std dev 30); green and blue are flat.
    // 30 / 4 = 7.5 stays under the threshold, so the root is kept whole.
    let mut pm = Pix::new(4, 4, PixelDepth::Bit32).unwrap().to_mut();
    for y in 0..4 {
        for x in 0..4 {
            let r = if (x + y) % 2 == 0 { 0 } else { 60 };
            pm.set_rgb(x, y, r, 100, 100).unwrap();
        }
    }
    let rgb: Pix = pm.into();
    let options = QuadTreeOptions::new()
        .with_min_block_size(1)
        .with_min_std_dev(9.0);
    let stat = StdDevEvaluator.evaluate(&rgb, &rgb.bounds()).unwrap();
    rp.compare_values(7.5, stat as f64, 1e-4);
    let tree = QuadTree::with_collaborators(&rgb, &options, &IdentityConverter, &StdDevEvaluator)
        .expect("rgb checkerboard tree");
    rp.compare_values(1.0, tree.leaf_count() as f64, 0.0);

    // Gray is replicated into three slots: 3 * 10 / 4
    let mut gm = Pix::new(4, 4, PixelDepth::Bit8).unwrap().to_mut();
    for y in 0..4 {
        for x in 0..4 {
            gm.set_pixel(x, y, if (x + y) % 2 == 0 { 0 } else { 20 }).unwrap();
        }
    }
    let gray: Pix = gm.into();
    let stat = StdDevEvaluator.evaluate(&gray, &gray.bounds()).unwrap();
    rp.compare_values(7.5, stat as f64, 1e-4);
    let tree = QuadTree::new(&gray, &options).expect("gray checkerboard tree");
    rp.compare_values(1.0, tree.leaf_count() as f64, 0.0);

    // Lowering the threshold below 7.5 splits down to single pixels
    let options = options.with_min_std_dev(7.0);
    let tree = QuadTree::new(&gray, &options).expect("split gray checkerboard");
    rp.compare_values(16.0, tree.leaf_count() as f64, 0.0);

    assert!(rp.cleanup(), "quadtree four-slot statistic test failed");
}

#[test]
fn quadtree_rejects_bad_input() {
    let mut rp = RegParams::new("quadtree_errors");

    let gray = Pix::new(8, 8, PixelDepth::Bit8).unwrap();
    let looping = QuadTreeOptions::new()
        .with_min_block_size(0)
        .with_min_std_dev(0.0);
    rp.check(
        matches!(
            QuadTree::new(&gray, &looping),
            Err(RegionError::InvalidParameters(_))
        ),
        "non-terminating options rejected",
    );
    let nan = QuadTreeOptions::new().with_min_std_dev(f32::NAN);
    rp.check(
        matches!(
            QuadTree::new(&gray, &nan),
            Err(RegionError::InvalidParameters(_))
        ),
        "NaN threshold rejected",
    );

    let result = QuadTree::with_collaborators(
        &gray,
        &QuadTreeOptions::default(),
        &LabConverter,
        &StdDevEvaluator,
    );
    rp.check(
        matches!(result, Err(RegionError::UnsupportedDepth { actual: 8, .. })),
        "Lab conversion of gray rejected",
    );

    assert!(rp.cleanup(), "quadtree errors test failed");
}
