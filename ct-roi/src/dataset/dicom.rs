//! DICOM 切片解码.

use super::decoder::{DecodeError, RawSlice, SliceDecoder};
use crate::data::RawAttrs;
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::{open_file, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use ndarray::Axis;
use std::path::Path;

/// 读取 DICOM 文件第一帧、第一个采样通道的原始像素值.
///
/// 解码时 **不** 应用 modality LUT; HU 变换由 [`crate::SliceMeta`] 统一完成,
/// 以便缺省规则保持一致.
#[derive(Copy, Clone, Debug, Default)]
pub struct DicomDecoder;

impl SliceDecoder for DicomDecoder {
    fn decode(&self, path: &Path) -> Result<RawSlice, DecodeError> {
        let obj = open_file(path)?;
        let attrs = attrs_of(&obj);

        let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
        // [frames, rows, columns, samples]
        let pixels = obj
            .decode_pixel_data()?
            .to_ndarray_with_options::<f32>(&options)?;
        let &[frames, _, _, samples] = pixels.shape() else {
            return Err(DecodeError::Layout(pixels.shape().to_vec()));
        };
        if frames == 0 || samples == 0 {
            return Err(DecodeError::Layout(pixels.shape().to_vec()));
        }
        let grid = pixels
            .index_axis_move(Axis(0), 0)
            .index_axis_move(Axis(2), 0);

        Ok(RawSlice { grid, attrs })
    }
}

/// 尽力读取窗口、HU 变换以及层厚、模态属性. 缺失、无法解析的属性均为 `None`,
/// 多值属性只取第一个值.
pub fn attrs_of(obj: &InMemDicomObject) -> RawAttrs {
    RawAttrs {
        window_center: first_float(obj, tags::WINDOW_CENTER),
        window_width: first_float(obj, tags::WINDOW_WIDTH),
        rescale_slope: first_float(obj, tags::RESCALE_SLOPE),
        rescale_intercept: first_float(obj, tags::RESCALE_INTERCEPT),
        slice_thickness: first_float(obj, tags::SLICE_THICKNESS),
        modality: obj
            .element_opt(tags::MODALITY)
            .ok()
            .flatten()
            .and_then(|e| e.to_str().ok())
            .map(|s| s.trim().to_owned()),
    }
}

fn first_float(obj: &InMemDicomObject, tag: Tag) -> Option<f64> {
    let elem = obj.element_opt(tag).ok().flatten()?;
    elem.to_multi_float64().ok()?.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_dicom_dir, LoadError};
    use crate::testing::scratch_dir;
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use dicom_dictionary_std::uids;
    use dicom_object::FileMetaTableBuilder;

    fn ds(tag: Tag, values: &[&str]) -> DataElement<InMemDicomObject> {
        let strs = values.iter().map(|s| s.to_string()).collect();
        DataElement::new(tag, VR::DS, PrimitiveValue::Strs(strs))
    }

    fn write_ct(path: &Path, rows: u16, cols: u16, pixels: Vec<u16>) {
        let obj = InMemDicomObject::from_element_iter([
            DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(uids::CT_IMAGE_STORAGE)),
            DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from("2.25.1")),
            DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from("MONOCHROME2")),
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(rows)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(cols)),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)),
            DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16)),
            ds(tags::RESCALE_SLOPE, &["1"]),
            ds(tags::RESCALE_INTERCEPT, &["-1024"]),
            ds(tags::SLICE_THICKNESS, &["2.5"]),
            DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("CT")),
            DataElement::new(tags::PIXEL_DATA, VR::OW, PrimitiveValue::U16(pixels.into())),
        ]);
        let file = obj
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                    .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid("2.25.1"),
            )
            .unwrap();
        file.write_to_file(path).unwrap();
    }

    #[test]
    fn test_attrs_multi_value_and_missing() {
        let obj = InMemDicomObject::from_element_iter([
            ds(tags::WINDOW_CENTER, &["40", "400"]),
            ds(tags::WINDOW_WIDTH, &["350", "1500"]),
            ds(tags::RESCALE_INTERCEPT, &["-1024"]),
        ]);
        let attrs = attrs_of(&obj);
        assert_eq!(attrs.window_center, Some(40.0));
        assert_eq!(attrs.window_width, Some(350.0));
        assert_eq!(attrs.rescale_intercept, Some(-1024.0));
        assert_eq!(attrs.rescale_slope, None);
        assert_eq!(attrs.slice_thickness, None);
        assert_eq!(attrs.modality, None);
    }

    #[test]
    fn test_decode_written_file() {
        let dir = scratch_dir("dicom-one");
        let path = dir.join("IM0001.dcm");
        write_ct(&path, 2, 3, vec![1024, 1034, 1044, 1054, 1064, 1074]);

        let sli = DicomDecoder.decode_slice(&path).unwrap();
        assert_eq!(sli.shape(), (2, 3));
        assert_eq!(sli[(0, 0)], 0.0);
        assert_eq!(sli[(1, 2)], 50.0);
        // 窗口缺失: 取原始像素的均值与极差.
        assert_eq!(sli.window().level(), 1049.0);
        assert_eq!(sli.window().width(), 50.0);
        assert_eq!(sli.meta().slice_thickness(), Some(2.5));
        assert_eq!(sli.meta().modality(), Some("CT"));
    }

    #[test]
    fn test_directory_with_unreadable_file() {
        let dir = scratch_dir("dicom-dir");
        for i in 0..3 {
            write_ct(&dir.join(format!("IM{i:04}.dcm")), 4, 4, vec![1024 + i; 16]);
        }
        std::fs::write(dir.join("README.txt"), "not a dicom file").unwrap();

        let store = load_dicom_dir(&dir).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.skipped().len(), 1);
        assert!(store.skipped()[0].path.ends_with("README.txt"));
        assert_eq!(store[2][(0, 0)], 2.0);
    }

    #[test]
    fn test_directory_without_images() {
        let dir = scratch_dir("dicom-empty");
        std::fs::write(dir.join("a.txt"), "a").unwrap();
        assert!(matches!(
            load_dicom_dir(&dir),
            Err(LoadError::NoValidImages { skipped: 1 })
        ));
    }
}
