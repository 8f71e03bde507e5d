use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn clear_color_fills_frame() {
    let mut be = CpuBackend::new();
    let list = DrawList {
        clear: Rgba8Premul::opaque(10, 20, 30),
        ..DrawList::default()
    };
    let f = be.render(canvas(8, 6), &list).unwrap();
    assert_eq!((f.width, f.height), (8, 6));
    assert_eq!(f.data.len(), 8 * 6 * 4);
    assert!(f.premultiplied);
    assert_eq!(f.pixel(3, 3), Some([10, 20, 30, 255]));
}

#[test]
fn circle_paints_its_center_only() {
    let mut be = CpuBackend::new();
    let list = DrawList {
        clear: Rgba8Premul::transparent(),
        cmds: vec![DrawCmd::Circle {
            center: Point::new(16.0, 16.0),
            radius: 6.0,
            color: Rgba8Premul::opaque(255, 0, 0),
        }],
        overlays: Vec::new(),
    };
    let f = be.render(canvas(32, 32), &list).unwrap();
    assert_eq!(f.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn context_is_reused_across_sizes() {
    let mut be = CpuBackend::new();
    let list = DrawList::default();
    be.render(canvas(4, 4), &list).unwrap();
    let f = be.render(canvas(10, 3), &list).unwrap();
    assert_eq!(f.data.len(), 10 * 3 * 4);
}

#[test]
fn unpremul_restores_straight_channels() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    let [r, g, b, a] = unpremul(c);
    assert_eq!(a, 128);
    assert!((i32::from(r) - 200).abs() <= 2);
    assert!((i32::from(g) - 100).abs() <= 2);
    assert!((i32::from(b) - 50).abs() <= 2);
}
