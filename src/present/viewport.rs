/// NDC half-extents of a `frame`-sized image fitted inside `window` with its
/// aspect ratio preserved. One axis is always `1.0`; the other leaves
/// letterbox (or pillarbox) bars.
pub fn letterbox(window: (u32, u32), frame: (usize, usize)) -> [f32; 2] {
    let (window_w, window_h) = (window.0.max(1) as f32, window.1.max(1) as f32);
    let (frame_w, frame_h) = (frame.0.max(1) as f32, frame.1.max(1) as f32);
    let window_aspect = window_w / window_h;
    let frame_aspect = frame_w / frame_h;
    if window_aspect > frame_aspect {
        [frame_aspect / window_aspect, 1.0]
    } else {
        [1.0, window_aspect / frame_aspect]
    }
}
