use linreg_rs::{Tensor, TensorData};

#[test]
fn test_tensor_addition() {
    let a = Tensor::<f32>::new(&[2, 2]).unwrap();
    let b = Tensor::<f32>::new(&[2, 2]).unwrap();
    let c = (&a + &b).unwrap();
    assert_eq!(c.shape(), &[2, 2]);
}

#[test]
fn test_fill_then_set_data() {
    let mut t = Tensor::<i32>::new(&[2, 2]).unwrap();
    assert_eq!(t.size(), 4);

    t.fill(5);
    assert_eq!(*t.get(&[0, 0]).unwrap(), 5);
    assert_eq!(*t.get(&[0, 1]).unwrap(), 5);
    assert_eq!(*t.get(&[1, 0]).unwrap(), 5);
    assert_eq!(*t.get(&[1, 1]).unwrap(), 5);

    t.set_data(vec![1, 2, 3, 4]).unwrap();
    assert_eq!(*t.get(&[0, 0]).unwrap(), 1);
    assert_eq!(*t.get(&[0, 1]).unwrap(), 2);
    assert_eq!(*t.get(&[1, 0]).unwrap(), 3);
    assert_eq!(*t.get(&[1, 1]).unwrap(), 4);
}

#[test]
fn test_size_is_product_of_shape() {
    for shape in [vec![1], vec![7], vec![2, 3], vec![4, 1, 5], vec![2, 2, 2, 2]] {
        let t = Tensor::<f64>::new(&shape).unwrap();
        assert_eq!(t.size(), shape.iter().product::<usize>());
        assert_eq!(t.rank(), shape.len());
    }
}

#[test]
fn test_set_data_length_must_match() {
    let mut t = Tensor::<f64>::new(&[3, 2]).unwrap();
    assert!(t.set_data(vec![0.0; 5]).unwrap_err().is_shape());
    assert!(t.set_data(vec![0.0; 7]).unwrap_err().is_shape());
    assert!(t.set_data(vec![1.0; 6]).is_ok());
}

#[test]
fn test_higher_rank_indexing() {
    let data: Vec<i32> = (0..24).collect();
    let mut t = Tensor::from_vec(&[2, 3, 4], data).unwrap();
    assert_eq!(t[[1, 2, 3]], 23);
    assert_eq!(t[[1, 0, 0]], 12);
    t.set(&[0, 1, 2], -1).unwrap();
    assert_eq!(t.to_vec()[6], -1);
    assert!(t.get(&[0, 3, 0]).unwrap_err().is_index());
}

#[test]
fn test_serialize_shape_and_data() {
    let t = Tensor::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, r#"{"shape":[2,2],"data":[1.0,2.0,3.0,4.0]}"#);

    let back: Tensor<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

#[test]
fn test_deserialize_validates() {
    let bad_len = serde_json::from_str::<Tensor<f64>>(r#"{"shape":[2,2],"data":[1.0]}"#);
    assert!(bad_len.is_err());

    let zero_dim = serde_json::from_str::<Tensor<f64>>(r#"{"shape":[0],"data":[]}"#);
    assert!(zero_dim.is_err());

    let overflow = serde_json::from_str::<Tensor<f64>>(
        r#"{"shape":[9223372036854775808,4],"data":[]}"#,
    );
    assert!(overflow.is_err());

    let raw = TensorData {
        shape: vec![3],
        data: vec![1, 2, 3],
    };
    let t = Tensor::try_from(raw).unwrap();
    assert_eq!(t.shape(), &[3]);
}
