extern crate ndarray_base;

extern crate serde;

extern crate serde_json;

extern crate rmp_serde;

extern crate ron;

use ndarray_base::{
    deserialize_meta_data, serialize_meta_data, zeros, CastingMode, DType, IndexMode, MetaData, Order, ScalarOptions,
    ZerosLikeOptions,
};

fn meta() -> MetaData {
    let x = zeros(DType::Complex64, &[2, 3, 4], Order::ColumnMajor).unwrap();
    deserialize_meta_data(&serialize_meta_data(&x)).unwrap()
}

#[test]
fn serial_enums_serde() {
    assert_eq!(serde_json::to_string(&DType::Uint8c).unwrap(), r#""uint8c""#);
    assert_eq!(serde_json::to_string(&Order::ColumnMajor).unwrap(), r#""column-major""#);
    assert_eq!(serde_json::to_string(&IndexMode::Clamp).unwrap(), r#""clamp""#);
    assert_eq!(serde_json::to_string(&CastingMode::SameKind).unwrap(), r#""same-kind""#);

    for &dt in DType::all() {
        let serial = serde_json::to_string(&dt).unwrap();
        assert_eq!(serial, format!("\"{}\"", dt));
        assert_eq!(serde_json::from_str::<DType>(&serial).unwrap(), dt);
    }
    assert!(serde_json::from_str::<DType>(r#""float16""#).is_err());
}

#[test]
fn serial_meta_data_serde() {
    let a = meta();
    let serial = serde_json::to_string(&a).unwrap();
    println!("Serde encode {:?} => {:?}", a, serial);
    let res = serde_json::from_str::<MetaData>(&serial);
    println!("{:?}", res);
    assert_eq!(a, res.unwrap());

    let text = r##"{"dtype":"int16","shape":[3,2],"strides":[-4,2],"offset":8,"order":"row-major","mode":"wrap","submode":["wrap","clamp"]}"##;
    let b = serde_json::from_str::<MetaData>(text).unwrap();
    assert_eq!(b.strides, vec![-4, 2]);
    assert_eq!(b.submode, vec![IndexMode::Wrap, IndexMode::Clamp]);
    assert_eq!(deserialize_meta_data(&b.to_bytes()).unwrap(), b);
}

#[test]
fn serial_meta_data_msgpack() {
    let a = meta();
    let buf = rmp_serde::to_vec(&a).unwrap();
    let res = rmp_serde::from_slice::<MetaData>(&buf);
    println!("{:?}", res);
    assert_eq!(a, res.unwrap());
}

#[test]
fn serial_meta_data_ron() {
    let a = meta();
    let serial = ron::ser::to_string(&a).unwrap();
    println!("RON encode {:?} => {:?}", a, serial);
    let res = ron::de::from_str::<MetaData>(&serial);
    println!("{:?}", res);
    assert_eq!(a, res.unwrap());
}

#[test]
fn serial_options_serde() {
    let opts: ZerosLikeOptions = serde_json::from_str(r#"{"dtype":"int8","shape":[2,0]}"#).unwrap();
    assert_eq!(opts, ZerosLikeOptions::new().dtype("int8").shape(vec![2i64, 0]));
    let opts: ZerosLikeOptions = serde_json::from_str(r#"{"shape":3,"readonly":true}"#).unwrap();
    assert_eq!(opts, ZerosLikeOptions::new().shape(3i64).readonly(true));

    let opts = ScalarOptions::new().dtype("complex128").order("column-major");
    let serial = serde_json::to_string(&opts).unwrap();
    assert_eq!(serde_json::from_str::<ScalarOptions>(&serial).unwrap(), opts);
}
