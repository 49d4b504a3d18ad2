use super::theme::{self, ThemeColors};
use cairo::Context;
use fittsmenu::geometry::bearing_to_surface;
use fittsmenu::{ArcSpan, Layout, Menu, Point, Rasterizer, Slice};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use std::f64::consts::PI;

const BORDER_WIDTH: f64 = 3.0;
const LABEL_FONT_SIZE: f64 = 12.0;

struct SliceRenderer<'a, R> {
    slice: &'a Slice<Pixbuf>,
    span: ArcSpan,
    layout: &'a Layout,
    center: Point,
    hovered: bool,
    scale: f64,
    rasterizer: &'a R,
}

impl<R: Rasterizer<Icon = Pixbuf>> SliceRenderer<'_, R> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_segment(cr, colors)?;
        match self.slice.icon() {
            Some(pixbuf) => self.draw_icon(cr, pixbuf),
            None => self.draw_label(cr, colors),
        }
    }

    fn draw_segment(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let geometry = self.layout.geometry();
        let (start, end) = (
            bearing_to_surface(self.span.start),
            bearing_to_surface(self.span.end),
        );

        cr.new_path();
        cr.arc(self.center.x, self.center.y, geometry.rim_radius(), start, end);
        cr.arc_negative(self.center.x, self.center.y, geometry.hub_radius(), end, start);
        cr.close_path();

        let fill = if self.hovered {
            colors.hovered
        } else {
            colors.slice
        };
        theme::set_source(cr, fill);
        cr.fill_preserve()?;

        theme::set_source(cr, colors.border);
        cr.set_line_width(BORDER_WIDTH);
        cr.stroke()
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let placement = self.layout.icon_placement(
            self.slice.index(),
            self.center,
            self.rasterizer.dimensions(pixbuf),
            self.scale,
        );

        cr.save()?;
        cr.translate(placement.origin.x, placement.origin.y);
        cr.scale(placement.scale, placement.scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let geometry = self.layout.geometry();
        let radius = (geometry.rim_radius() + geometry.hub_radius()) / 2.0;
        let anchor = Point::at_bearing(self.center, radius, self.span.center());
        draw_text(cr, colors, self.slice.label(), anchor, LABEL_FONT_SIZE * self.scale)
    }
}

fn draw_text(
    cr: &Context,
    colors: &ThemeColors,
    text: &str,
    at: Point,
    size: f64,
) -> Result<(), cairo::Error> {
    theme::set_source(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(at.x - ext.width() / 2.0, at.y + ext.height() / 2.0);
        cr.show_text(text)?;
    }
    Ok(())
}

pub fn draw<R>(
    cr: &Context,
    menu: &Menu<Pixbuf>,
    rasterizer: &R,
    colors: &ThemeColors,
) -> Result<(), cairo::Error>
where
    R: Rasterizer<Icon = Pixbuf>,
{
    let Some(center) = menu.center() else {
        return Ok(());
    };
    let layout = menu.layout();

    cr.set_tolerance(0.1);
    draw_hub(cr, &layout, center, colors)?;

    for (i, (slice, span)) in menu.slices().iter().zip(layout.spans()).enumerate() {
        SliceRenderer {
            slice,
            span,
            layout: &layout,
            center,
            hovered: menu.hover_index() == Some(i),
            scale: menu.slice_scale(i),
            rasterizer,
        }
        .draw(cr, colors)?;
    }

    if let Some(hovered) = menu.hovered() {
        draw_text(cr, colors, hovered.label(), center, LABEL_FONT_SIZE)?;
    }
    Ok(())
}

fn draw_hub(
    cr: &Context,
    layout: &Layout,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    theme::set_source(cr, colors.hub);
    cr.new_path();
    cr.arc(
        center.x,
        center.y,
        layout.geometry().hub_radius(),
        0.0,
        2.0 * PI,
    );
    cr.fill()
}
