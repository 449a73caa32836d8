use glow_core::{IonoDataset, Quantity, WAVELENGTH_LABELS};
use plotly::common::{Mode, Title};
use plotly::layout::{Axis, AxisType};
use plotly::{Layout, Plot, Scatter};

/// Open the four post-run figures, one browser tab each: electron
/// density, ion composition, neutral temperature, emission rates.
pub(super) fn show_all(dataset: &IonoDataset) {
    electron_density(dataset).show();
    ion_composition(dataset).show();
    neutral_temperature(dataset).show();
    emission_rates(dataset).show();
}

fn electron_density(dataset: &IonoDataset) -> Plot {
    profile_plot(
        dataset,
        "Electron density",
        "density (cm^-3)",
        true,
        &[Quantity::NeIn, Quantity::NeOut],
    )
}

fn ion_composition(dataset: &IonoDataset) -> Plot {
    profile_plot(
        dataset,
        "Ion / neutral composition",
        "density (cm^-3)",
        true,
        &[Quantity::OPlus, Quantity::N2],
    )
}

fn neutral_temperature(dataset: &IonoDataset) -> Plot {
    profile_plot(
        dataset,
        "Neutral temperature",
        "Tn (K)",
        false,
        &[Quantity::Tn],
    )
}

fn emission_rates(dataset: &IonoDataset) -> Plot {
    let altitudes = dataset.alt_km().to_vec();
    let mut plot = Plot::new();
    for (index, label) in WAVELENGTH_LABELS.iter().copied().enumerate() {
        let trace = Scatter::new(dataset.ver_column(index), altitudes.clone())
            .name(label)
            .mode(Mode::Lines);
        plot.add_trace(trace);
    }
    plot.set_layout(altitude_layout(
        "Volume Emission Rate (VER)",
        "VER (photons cm^-3 s^-1)",
        true,
    ));
    plot
}

fn profile_plot(
    dataset: &IonoDataset,
    title: &str,
    x_title: &str,
    log_x: bool,
    quantities: &[Quantity],
) -> Plot {
    let altitudes = dataset.alt_km().to_vec();
    let mut plot = Plot::new();
    for &quantity in quantities {
        let trace = Scatter::new(dataset.profile(quantity).to_vec(), altitudes.clone())
            .name(quantity.as_str())
            .mode(Mode::Lines);
        plot.add_trace(trace);
    }
    plot.set_layout(altitude_layout(title, x_title, log_x));
    plot
}

fn altitude_layout(title: &str, x_title: &str, log_x: bool) -> Layout {
    let mut x_axis = Axis::new().title(Title::new(x_title));
    if log_x {
        x_axis = x_axis.type_(AxisType::Log);
    }
    Layout::new()
        .title(Title::new(title))
        .x_axis(x_axis)
        .y_axis(Axis::new().title(Title::new("altitude (km)")))
        .show_legend(true)
        .auto_size(true)
}
