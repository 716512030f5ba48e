use serde::Serialize;

/// Display options for the rendered candlestick page.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub split_number: u32,
    pub zoom_start: f64,
    pub zoom_end: f64,
}

// ── ECharts option object ────────────────────────────────────────────────
//
// Serialized verbatim into the page and handed to `chart.setOption`. The
// chart engine itself runs in the browser; this side only shapes the data.

#[derive(Debug, Serialize)]
struct EchartsOption {
    title: Title,
    tooltip: Tooltip,
    #[serde(rename = "xAxis")]
    x_axis: XAxis,
    #[serde(rename = "yAxis")]
    y_axis: YAxis,
    #[serde(rename = "dataZoom")]
    data_zoom: Vec<DataZoom>,
    series: Vec<Series>,
}

#[derive(Debug, Serialize)]
struct Title {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tooltip {
    trigger: &'static str,
}

#[derive(Debug, Serialize)]
struct XAxis {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "splitNumber")]
    split_number: u32,
    data: Vec<String>,
}

#[derive(Debug, Serialize)]
struct YAxis {
    scale: bool,
}

/// One zoom control: `inside` (wheel/drag on the plot) or `slider`.
#[derive(Debug, Serialize)]
struct DataZoom {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "xAxisIndex")]
    x_axis_index: Vec<u32>,
    start: f64,
    end: f64,
}

#[derive(Debug, Serialize)]
struct Series {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    data: Vec<[f32; 4]>,
}

fn build_option(opts: &ChartOptions, dates: Vec<String>, ohlc: Vec<[f32; 4]>) -> EchartsOption {
    EchartsOption {
        title: Title {
            text: opts.title.clone(),
        },
        tooltip: Tooltip { trigger: "axis" },
        x_axis: XAxis {
            kind: "category",
            split_number: opts.split_number,
            data: dates,
        },
        y_axis: YAxis { scale: true },
        data_zoom: vec![
            DataZoom {
                kind: "inside",
                x_axis_index: vec![0],
                start: opts.zoom_start,
                end: opts.zoom_end,
            },
            DataZoom {
                kind: "slider",
                x_axis_index: vec![0],
                start: opts.zoom_start,
                end: opts.zoom_end,
            },
        ],
        series: vec![Series {
            kind: "candlestick",
            name: "kline",
            data: ohlc,
        }],
    }
}

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.0/dist/echarts.min.js";

/// Render the full chart page.
///
/// `dates` and `ohlc` are parallel sequences; index `i` of one describes
/// index `i` of the other.
pub fn render_page(opts: &ChartOptions, dates: Vec<String>, ohlc: Vec<[f32; 4]>) -> String {
    let option = build_option(opts, dates, ohlc);
    let option_json = serde_json::to_string(&option).unwrap_or_else(|_| "{}".to_string());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{cdn}"></script>
    <style>
        body {{ margin: 0; background: #ffffff; }}
        #chart {{ width: 100%; height: 600px; }}
    </style>
</head>
<body>
    <div id="chart"></div>
    <script>
        var chart = echarts.init(document.getElementById('chart'));
        chart.setOption({option});
        window.addEventListener('resize', function () {{ chart.resize(); }});
    </script>
</body>
</html>
"##,
        title = opts.title,
        cdn = ECHARTS_CDN,
        option = option_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn test_opts() -> ChartOptions {
        ChartOptions {
            title: "BIBOX BTC".to_string(),
            split_number: 20,
            zoom_start: 50.0,
            zoom_end: 100.0,
        }
    }

    fn option_value(dates: Vec<String>, ohlc: Vec<[f32; 4]>) -> Value {
        serde_json::to_value(build_option(&test_opts(), dates, ohlc)).unwrap()
    }

    #[test]
    fn option_keeps_axes_parallel() {
        let dates = vec!["2021/01/01".to_string(), "2021/01/02".to_string()];
        let ohlc = vec![[1.0, 2.0, 3.0, 0.5], [2.0, 1.5, 2.5, 1.0]];
        let v = option_value(dates, ohlc);

        let x_len = v["xAxis"]["data"].as_array().unwrap().len();
        let series_len = v["series"][0]["data"].as_array().unwrap().len();
        assert_eq!(x_len, 2);
        assert_eq!(x_len, series_len);
    }

    #[test]
    fn candlestick_data_passes_tuples_through_verbatim() {
        let v = option_value(
            vec!["2021/01/01".to_string()],
            vec![[100.5, 105.3, 110.2, 95.0]],
        );

        let series = &v["series"][0];
        assert_eq!(series["type"], "candlestick");
        assert_eq!(series["name"], "kline");

        let row = series["data"][0].as_array().unwrap();
        let row: Vec<f64> = row.iter().map(|x| x.as_f64().unwrap()).collect();
        assert_eq!(row, vec![100.5f32 as f64, 105.3f32 as f64, 110.2f32 as f64, 95.0]);
    }

    #[test]
    fn zoom_controls_cover_inside_and_slider() {
        let v = option_value(Vec::new(), Vec::new());
        let zooms = v["dataZoom"].as_array().unwrap();

        assert_eq!(zooms.len(), 2);
        assert_eq!(zooms[0]["type"], "inside");
        assert_eq!(zooms[1]["type"], "slider");
        for z in zooms {
            assert_eq!(z["xAxisIndex"], serde_json::json!([0]));
            assert_eq!(z["start"], 50.0);
            assert_eq!(z["end"], 100.0);
        }
    }

    #[test]
    fn axis_options_match_display_config() {
        let v = option_value(Vec::new(), Vec::new());

        assert_eq!(v["title"]["text"], "BIBOX BTC");
        assert_eq!(v["xAxis"]["type"], "category");
        assert_eq!(v["xAxis"]["splitNumber"], 20);
        assert_eq!(v["yAxis"]["scale"], true);
        assert_eq!(v["tooltip"]["trigger"], "axis");
    }

    #[test]
    fn page_embeds_the_option_and_chart_bootstrap() {
        let page = render_page(
            &test_opts(),
            vec!["2021/01/01".to_string()],
            vec![[1.0, 2.0, 3.0, 0.5]],
        );

        assert!(page.contains("<title>BIBOX BTC</title>"));
        assert!(page.contains("echarts.init"));
        assert!(page.contains("\"candlestick\""));
        assert!(page.contains("2021/01/01"));
        assert!(page.contains(ECHARTS_CDN));
    }
}
