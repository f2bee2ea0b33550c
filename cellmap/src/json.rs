use crate::Diagram;
use serde::Serialize;
use serde_json::Value;

pub fn to_json_impl(d: &Diagram) -> Value {
    #[derive(Serialize)]
    struct PointSer {
        id: u32,
        x: f32,
        y: f32,
    }
    #[derive(Serialize)]
    struct CellSer {
        id: u32,
        area: f32,
        t: f32,
        color: String,
        points: Vec<f32>,
    }
    #[derive(Serialize)]
    struct ScaleSer {
        min: f32,
        max: f32,
        tied: bool,
    }
    #[derive(Serialize)]
    struct DiagramSer {
        width: f32,
        height: f32,
        points: Vec<PointSer>,
        cells: Vec<CellSer>,
        scale: ScaleSer,
    }

    let points = d.points().iter().map(|&(id, p)| PointSer { id, x: p.x, y: p.y }).collect();
    let cells = d
        .cells()
        .map(|c| {
            let t = d.shade(c.id).map_or(0.0, |s| s.t);
            let mut pts = Vec::with_capacity(c.points.len() * 2);
            for p in &c.points {
                pts.push(p.x);
                pts.push(p.y);
            }
            CellSer { id: c.id, area: c.area, t, color: c.fill.to_string(), points: pts }
        })
        .collect();
    let scale = d.area_scale();
    serde_json::to_value(DiagramSer {
        width: d.config.width,
        height: d.config.height,
        points,
        cells,
        scale: ScaleSer { min: scale.min, max: scale.max, tied: scale.tied },
    })
    .unwrap_or(Value::Null)
}
