use crate::model::SUNDAY;

/// Jours travaillés d'une semaine : les jours hors repos principal, pris
/// cycliquement à partir du lendemain du repos, décalés selon l'opérateur.
/// Avec `sunday_off`, le dimanche passe en fin de liste pour tomber dans les
/// repos supplémentaires quand le quota en laisse.
pub(super) fn working_days(
    worker: usize,
    rest_day: u8,
    quota: u32,
    days_covered: u8,
    sunday_off: bool,
) -> Vec<u8> {
    let mut order: Vec<u8> = (1..days_covered)
        .map(|k| (rest_day + k) % days_covered)
        .collect();
    if order.is_empty() {
        return order;
    }
    let shift = worker % order.len();
    order.rotate_left(shift);

    let quota = (quota as usize).min(order.len());
    if sunday_off && quota < order.len() {
        if let Some(pos) = order.iter().position(|&d| d == SUNDAY) {
            let sunday = order.remove(pos);
            order.push(sunday);
        }
    }
    order.truncate(quota);
    order
}

/// Décalage des dimanches au sein d'un groupe de quart : une moitié du groupe
/// (pour un plafond de 2) lâche son dimanche une semaine, l'autre la suivante.
pub(super) fn sunday_turn(worker: usize, week: u32, shift_count: u32, cap: u32) -> bool {
    let cap = u64::from(cap.max(1));
    let position = (worker / shift_count.max(1) as usize) as u64;
    (position + u64::from(week)) % cap == cap - 1
}
