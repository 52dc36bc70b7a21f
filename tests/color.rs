mod tests {
    use underglow_composer::color::{
        BrightnessRange, Hsb, Rgb, blend256, halve, rgb_from_u32, scale_hex,
    };

    #[test]
    fn test_hsb_primaries() {
        assert_eq!(Hsb::new(0, 100, 100).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsb::new(120, 100, 100).to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(Hsb::new(240, 100, 100).to_rgb(), Rgb::new(0, 0, 255));
        assert_eq!(Hsb::new(360, 100, 100).to_rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hsb_extremes() {
        assert_eq!(Hsb::new(200, 0, 100).to_rgb(), Rgb::new(255, 255, 255));
        assert_eq!(Hsb::new(200, 100, 0).to_rgb(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_hsb_continuous_across_sectors() {
        let mut prev = Hsb::new(0, 100, 100).to_rgb();
        for h in 1..=360 {
            let rgb = Hsb::new(h, 100, 100).to_rgb();
            assert!(prev.r.abs_diff(rgb.r) <= 6, "red jumps at hue {h}");
            assert!(prev.g.abs_diff(rgb.g) <= 6, "green jumps at hue {h}");
            assert!(prev.b.abs_diff(rgb.b) <= 6, "blue jumps at hue {h}");
            prev = rgb;
        }
    }

    #[test]
    fn test_hsb_validity_bounds() {
        assert!(Hsb::new(360, 100, 100).is_valid());
        assert!(!Hsb::new(361, 0, 0).is_valid());
        assert!(!Hsb::new(0, 101, 0).is_valid());
        assert!(!Hsb::new(0, 0, 101).is_valid());
    }

    #[test]
    fn test_brightness_range() {
        assert_eq!(BrightnessRange::new(80, 20), None);
        assert_eq!(BrightnessRange::new(20, 101), None);

        let range = BrightnessRange::new(20, 80).unwrap();
        assert_eq!(Hsb::new(0, 100, 0).scale_to_range(range).b, 20);
        assert_eq!(Hsb::new(0, 100, 50).scale_to_range(range).b, 50);
        assert_eq!(Hsb::new(0, 100, 100).scale_to_range(range).b, 80);

        assert_eq!(Hsb::new(0, 100, 0).scale_from_zero(range).b, 0);
        assert_eq!(Hsb::new(0, 100, 50).scale_from_zero(range).b, 40);
    }

    #[test]
    fn test_blend256() {
        let ambient = Rgb::new(200, 0, 0);
        let status = Rgb::new(0, 200, 0);
        assert_eq!(blend256(ambient, status, 0), ambient);
        assert_eq!(blend256(ambient, status, 128), Rgb::new(100, 100, 0));
        assert_eq!(blend256(ambient, status, 256), status);
    }

    #[test]
    fn test_halve() {
        assert_eq!(halve(Rgb::new(200, 101, 1)), Rgb::new(100, 50, 0));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(rgb_from_u32(0x6B_1F_CE), Rgb::new(0x6B, 0x1F, 0xCE));
        assert_eq!(scale_hex(0xFF_00_00, 100), Rgb::new(100, 0, 0));
        assert_eq!(scale_hex(0xFF_FF_FF, 255), Rgb::new(255, 255, 255));
    }
}
