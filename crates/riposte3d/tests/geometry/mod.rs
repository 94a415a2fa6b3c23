mod broad_phase_pairs;
mod pipeline_step;
mod sat_gjk_agreement;
