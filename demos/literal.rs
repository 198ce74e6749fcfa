use strapx::solve;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Distances to the buttons and the angle between them, measured off a photo
    let equilibrium = solve(174.0028735394907, 181.99450541156455, 3.0312562559449687, 400.0)?;

    println!("guitar angle: {:.4} rad", equilibrium.guitar_angle);
    println!("left strap segment: {:.4}", equilibrium.left_strap_seg_len);
    println!("strap angle: {:.4} rad", equilibrium.strap_angle);

    Ok(())
}
