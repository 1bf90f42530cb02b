use web_sys as web;

/// Size the canvas backing store to its hosting container's box and return
/// the new dimensions. Falls back to the canvas's own rect when it has no
/// parent element.
pub fn fit_canvas_to_parent(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas
        .parent_element()
        .map(|p| p.get_bounding_client_rect())
        .unwrap_or_else(|| canvas.get_bounding_client_rect());
    let width = (rect.width() as u32).max(1);
    let height = (rect.height() as u32).max(1);
    canvas.set_width(width);
    canvas.set_height(height);
    (width as f32, height as f32)
}
