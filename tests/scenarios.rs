use {
    airmon::{
        aggregator::{Aggregator, Source},
        report::{keyed_values, text_report, Document, Value},
        sensors::{Climate, Particulates, Sensor},
    },
    anyhow::{anyhow, Result},
    serde_json::json,
    std::collections::VecDeque,
};

struct Scripted<T>(VecDeque<Result<T>>);

impl<T> Scripted<T> {
    fn new(reads: Vec<Result<T>>) -> Self {
        Scripted(reads.into())
    }
}

impl<T> Sensor for Scripted<T> {
    type Reading = T;

    fn measure(&mut self) -> Result<T> {
        self.0
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("script exhausted")))
    }
}

fn climate(co2: u16, temperature: f32, humidity: f32) -> Climate {
    Climate {
        co2,
        temperature,
        humidity,
    }
}

#[test]
fn all_sensors_read() {
    let mut agg = Aggregator::new(
        Scripted::<u16>::new(vec![Ok(512)]),
        Scripted::<Particulates>::new(vec![Ok(Particulates { pm2_5: 8, pm10: 15 })]),
        Scripted::<Climate>::new(vec![Ok(climate(612, 22.34, 55.67))]),
    );
    agg.read_cycle();

    let doc = Document::from_snapshot(1, agg.snapshot());
    assert_eq!(doc.sensor_data.len(), 6);
    assert_eq!(
        doc.sensor_data.iter().map(|e| e.sensor_name).collect::<Vec<_>>(),
        ["VOC", "PM2.5", "PM10", "CO2", "Temperatura", "Humedad"]
    );
    assert_eq!(
        doc.sensor_data.iter().map(|e| e.unit).collect::<Vec<_>>(),
        ["", "µg/m³", "µg/m³", "ppm", "°C", "%"]
    );
    assert_eq!(doc.sensor_data[4].value.unwrap().to_string(), "22.3");
    assert_eq!(doc.sensor_data[5].value.unwrap().to_string(), "55.7");

    let parsed: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(parsed["device_id"], json!(1));
    assert_eq!(parsed["sensor_data"][0]["value"], json!(512));
    assert_eq!(parsed["sensor_data"][3]["value"], json!(612));
    assert_eq!(parsed["sensor_data"][4]["value"], json!(22.3));
    assert_eq!(parsed["sensor_data"][5]["value"], json!(55.7));
    assert_eq!(parsed["sensor_data"][4]["unit"], json!("°C"));

    assert!(text_report(agg.snapshot()).contains("Temperatura: 22.3 °C\n"));
}

#[test]
fn co2_failure_keeps_stale_value() {
    let mut agg = Aggregator::new(
        Scripted::<u16>::new(vec![Ok(400), Ok(410)]),
        Scripted::<Particulates>::new(vec![
            Ok(Particulates { pm2_5: 5, pm10: 9 }),
            Ok(Particulates { pm2_5: 6, pm10: 10 }),
        ]),
        Scripted::<Climate>::new(vec![
            Ok(climate(700, 21.0, 45.0)),
            Err(anyhow!("i2c timeout")),
        ]),
    );

    agg.read_cycle();
    agg.read_cycle();

    assert_eq!(agg.stale_sources(), &[Source::Climate]);
    let snapshot = agg.snapshot();
    assert_eq!(snapshot.co2, Some(700));
    assert_eq!(snapshot.temperature, Some(21.0));
    assert_eq!(snapshot.humidity, Some(45.0));
    assert_eq!(snapshot.pm2_5, Some(6));
    assert!(snapshot.is_complete());

    let doc = Document::from_snapshot(1, snapshot);
    let co2 = doc
        .sensor_data
        .iter()
        .find(|e| e.sensor_name == "CO2")
        .unwrap();
    assert_eq!(co2.value, Some(Value::Integer(700)));
}

#[test]
fn particulates_never_read() {
    let mut agg = Aggregator::new(
        Scripted::<u16>::new(vec![Ok(300)]),
        Scripted::<Particulates>::new(vec![Err(anyhow!("bad checksum"))]),
        Scripted::<Climate>::new(vec![Ok(climate(650, 19.96, 38.0))]),
    );
    agg.read_cycle();

    let snapshot = agg.snapshot();
    assert_eq!(snapshot.pm2_5, None);
    assert_eq!(snapshot.pm10, None);
    assert!(snapshot.is_complete());

    let doc = Document::from_snapshot(1, snapshot);
    assert_eq!(doc.sensor_data.len(), 6);
    assert_eq!(doc.sensor_data[1].value, None);
    assert_eq!(doc.sensor_data[2].value, None);

    let parsed: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(
        parsed["sensor_data"][1],
        json!({"sensor_name": "PM2.5", "value": null, "unit": "µg/m³"})
    );

    let kv = keyed_values(snapshot);
    assert_eq!(kv["PM10"], None);
    assert_eq!(kv["Temperatura"], Some(Value::Decimal(20.0)));

    assert!(text_report(snapshot).contains("PM2.5: n/a\n"));
}

#[test]
fn nothing_published_before_climate_is_read() {
    let mut agg = Aggregator::new(
        Scripted::<u16>::new(vec![Ok(1000)]),
        Scripted::<Particulates>::new(vec![Ok(Particulates { pm2_5: 1, pm10: 1 })]),
        Scripted::<Climate>::new(vec![Err(anyhow!("data not ready"))]),
    );
    agg.read_cycle();

    let snapshot = agg.snapshot();
    assert!(!snapshot.is_complete());
    assert!(keyed_values(snapshot).is_empty());
    assert!(text_report(snapshot).is_empty());

    let json = Document::from_snapshot(3, snapshot).to_json().unwrap();
    assert_eq!(json, r#"{"device_id":3,"sensor_data":[]}"#);
}
