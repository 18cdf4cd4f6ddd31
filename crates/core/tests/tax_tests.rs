// ═══════════════════════════════════════════════════════════════════
// Income Tax Tests — slab tables, cess, regime comparison
// ═══════════════════════════════════════════════════════════════════

use approx::assert_abs_diff_eq;

use fincalc_core::calculators::income_tax::{
    calculate_income_tax, compare_regimes, slab_breakdown, slab_tax, IncomeTaxInput, TaxRegime,
    CESS_RATE, NEW_REGIME_BASIC_EXEMPTION, OLD_REGIME_BASIC_EXEMPTION,
    OLD_REGIME_STANDARD_DEDUCTION,
};

mod tables {
    use super::*;

    #[test]
    fn old_regime_has_four_bands() {
        assert_eq!(TaxRegime::Old.slabs().len(), 4);
        assert_eq!(TaxRegime::Old.slabs()[0].upper, Some(OLD_REGIME_BASIC_EXEMPTION));
    }

    #[test]
    fn new_regime_has_six_bands() {
        let slabs = TaxRegime::New.slabs();
        assert_eq!(slabs.len(), 6);
        assert_eq!(slabs[0].upper, Some(NEW_REGIME_BASIC_EXEMPTION));
        assert_eq!(slabs[5].upper, None);
        assert_eq!(slabs[5].rate, 0.30);
    }

    #[test]
    fn only_old_regime_has_standard_deduction() {
        assert_eq!(TaxRegime::Old.standard_deduction(), OLD_REGIME_STANDARD_DEDUCTION);
        assert_eq!(TaxRegime::New.standard_deduction(), 0.0);
    }

    #[test]
    fn band_rates_never_decrease() {
        for regime in [TaxRegime::Old, TaxRegime::New] {
            let rates: Vec<f64> = regime.slabs().iter().map(|s| s.rate).collect();
            assert!(rates.windows(2).all(|w| w[0] <= w[1]), "{regime}");
        }
    }
}

mod old_regime {
    use super::*;

    #[test]
    fn ten_lakh_with_deductions() {
        let input = IncomeTaxInput::new(1_000_000.0, TaxRegime::Old).with_deductions(150_000.0);
        let result = calculate_income_tax(&input).unwrap();
        assert_eq!(result.taxable_income, 800_000.0);
        assert_eq!(result.slab_tax, 72_500.0);
        assert_eq!(result.cess, 2_900.0);
        assert_eq!(result.total_tax, 75_400.0);
    }

    #[test]
    fn income_below_exemption_plus_standard_deduction_is_untaxed() {
        let result = calculate_income_tax(&IncomeTaxInput::new(299_999.0, TaxRegime::Old)).unwrap();
        assert_eq!(result.total_tax, 0.0);
    }

    #[test]
    fn deductions_cannot_make_taxable_income_negative() {
        let input = IncomeTaxInput::new(100_000.0, TaxRegime::Old).with_deductions(500_000.0);
        let result = calculate_income_tax(&input).unwrap();
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.effective_rate_pct, 0.0);
    }

    #[test]
    fn breakdown_sums_to_slab_tax() {
        let input = IncomeTaxInput::new(2_000_000.0, TaxRegime::Old);
        let result = calculate_income_tax(&input).unwrap();
        let sum: f64 = result.slabs.iter().map(|s| s.tax).sum();
        assert_abs_diff_eq!(sum, result.slab_tax, epsilon = 0.5);
    }
}

mod new_regime {
    use super::*;

    #[test]
    fn ten_lakh() {
        let result = calculate_income_tax(&IncomeTaxInput::new(1_000_000.0, TaxRegime::New)).unwrap();
        assert_eq!(result.slab_tax, 50_000.0);
        assert_eq!(result.total_tax, 52_000.0);
        assert_eq!(result.effective_rate_pct, 5.2);
    }

    #[test]
    fn twenty_lakh() {
        let result = calculate_income_tax(&IncomeTaxInput::new(2_000_000.0, TaxRegime::New)).unwrap();
        assert_eq!(result.slab_tax, 290_000.0);
        assert_eq!(result.total_tax, 301_600.0);
    }

    #[test]
    fn ignores_deductions() {
        let with = IncomeTaxInput::new(1_500_000.0, TaxRegime::New).with_deductions(200_000.0);
        let without = IncomeTaxInput::new(1_500_000.0, TaxRegime::New);
        assert_eq!(slab_tax(&with), slab_tax(&without));
        assert_eq!(with.taxable_income(), 1_500_000.0);
    }

    #[test]
    fn zero_income() {
        let result = calculate_income_tax(&IncomeTaxInput::new(0.0, TaxRegime::New)).unwrap();
        assert_eq!(result.total_tax, 0.0);
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn lowest_boundary_minus_one_pays_nothing() {
        // Old regime boundary sits above the standard deduction.
        let old_edge = OLD_REGIME_BASIC_EXEMPTION + OLD_REGIME_STANDARD_DEDUCTION;
        assert_eq!(slab_tax(&IncomeTaxInput::new(old_edge - 1.0, TaxRegime::Old)), 0.0);
        assert_eq!(
            slab_tax(&IncomeTaxInput::new(NEW_REGIME_BASIC_EXEMPTION - 1.0, TaxRegime::New)),
            0.0
        );
    }

    #[test]
    fn one_unit_above_each_boundary_adds_that_bands_rate() {
        for regime in [TaxRegime::Old, TaxRegime::New] {
            let slabs = regime.slabs();
            for (idx, slab) in slabs.iter().enumerate() {
                let Some(upper) = slab.upper else { continue };
                let gross = upper + regime.standard_deduction();
                let at = slab_tax(&IncomeTaxInput::new(gross, regime));
                let above = slab_tax(&IncomeTaxInput::new(gross + 1.0, regime));
                let next_rate = slabs[idx + 1].rate;
                assert_abs_diff_eq!(above - at, next_rate, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn breakdown_bands_are_contiguous() {
        let bands = slab_breakdown(2_000_000.0, TaxRegime::New.slabs());
        for pair in bands.windows(2) {
            assert_eq!(pair[0].upper, Some(pair[1].lower));
        }
        assert_eq!(bands[0].lower, 0.0);
    }

    #[test]
    fn cess_is_four_percent_of_slab_tax() {
        let result = calculate_income_tax(&IncomeTaxInput::new(1_800_000.0, TaxRegime::New)).unwrap();
        assert_abs_diff_eq!(result.cess, result.slab_tax * CESS_RATE, epsilon = 1.0);
    }
}

mod comparison {
    use super::*;

    #[test]
    fn new_regime_wins_without_deductions() {
        let cmp = compare_regimes(1_200_000.0, 0.0).unwrap();
        assert_eq!(cmp.recommended, TaxRegime::New);
        assert_abs_diff_eq!(cmp.old.slab_tax, 157_500.0, epsilon = 0.5);
        assert_abs_diff_eq!(cmp.new.slab_tax, 80_000.0, epsilon = 0.5);
        assert_eq!(cmp.savings, cmp.old.total_tax - cmp.new.total_tax);
    }

    #[test]
    fn tie_prefers_new_regime() {
        let cmp = compare_regimes(200_000.0, 0.0).unwrap();
        assert_eq!(cmp.old.total_tax, 0.0);
        assert_eq!(cmp.new.total_tax, 0.0);
        assert_eq!(cmp.recommended, TaxRegime::New);
        assert_eq!(cmp.savings, 0.0);
    }

    #[test]
    fn negative_income_is_rejected() {
        let err = compare_regimes(-5.0, 0.0).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "annual_income");
    }
}
